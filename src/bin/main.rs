//! Cycles Export CLI
//!
//! Write a JSON scene description as a Cycles XML document.

use clap::{Parser, Subcommand};
use cycles_export::{load_scene, material_markup, write_scene, ExportOptions, BACKGROUND_TAG, SHADER_TAG};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cycles-export")]
#[command(author, version, about = "Export scenes to the Cycles XML format", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a whole scene
    Export {
        /// Input JSON scene file
        #[arg(short, long)]
        input: PathBuf,

        /// Output XML file
        #[arg(short, long)]
        output: PathBuf,

        /// Embed image textures as base64 PNG
        #[arg(long)]
        inline_textures: bool,

        /// Directory for resolving relative texture paths
        #[arg(long, requires = "inline_textures")]
        texture_root: Option<PathBuf>,

        /// Disable indentation and column alignment
        #[arg(long)]
        compact: bool,

        /// Keep links into output nodes, targeting the reserved `output` node
        #[arg(long)]
        connect_output: bool,

        /// Abort on the first object that cannot be exported
        #[arg(long)]
        strict: bool,
    },

    /// Print the translated shader of one material
    Material {
        /// Input JSON scene file
        #[arg(short, long)]
        input: PathBuf,

        /// Material name (the world when used with --background)
        #[arg(short, long)]
        name: Option<String>,

        /// Translate the world shader as a background
        #[arg(long)]
        background: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input,
            output,
            inline_textures,
            texture_root,
            compact,
            connect_output,
            strict,
        } => {
            let mut options = ExportOptions::default()
                .with_connect_output(connect_output)
                .with_strict(strict);
            if inline_textures {
                options = options.with_inline_textures(texture_root);
            }
            if compact {
                options = options.compact();
            }
            export(&input, &output, &options)?;
        }
        Commands::Material {
            input,
            name,
            background,
        } => {
            print_material(&input, name.as_deref(), background)?;
        }
    }

    Ok(())
}

fn export(
    input_path: &PathBuf,
    output_path: &PathBuf,
    options: &ExportOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading scene from {:?}...", input_path);
    let scene = load_scene(input_path)?;
    println!("  Found {} objects", scene.objects.len());

    println!("Exporting with options:");
    println!("  - Inline textures: {}", options.inline_textures);
    println!("  - Formatted XML: {}", options.format_xml);
    println!("  - Connect output: {}", options.connect_output);

    write_scene(output_path, &scene, options)?;
    println!("Exported Cycles XML to {:?}", output_path);

    Ok(())
}

fn print_material(
    input_path: &PathBuf,
    name: Option<&str>,
    background: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let scene = load_scene(input_path)?;
    let options = ExportOptions::default();

    let material = if background {
        scene.world.clone()
    } else {
        let name = name.ok_or("--name is required unless --background is given")?;
        scene
            .objects
            .iter()
            .flat_map(|o| o.assigned_materials())
            .find(|m| m.name == name)
            .cloned()
    };
    let material = material.ok_or("Material not found")?;

    let tag = if background { BACKGROUND_TAG } else { SHADER_TAG };
    match material_markup(&material, tag, &options) {
        Some(text) => print!("{}", text),
        None => println!("Material {:?} has no output node", material.name),
    }

    Ok(())
}
