//! Column-aligned multi-line attribute writer.
//!
//! Long numeric attributes (vertex positions, face indices, matrices) are
//! split into chunks of `per_line` items, one chunk per line. When aligned,
//! continuation lines are padded so they start under the first value:
//!
//! ```text
//! <mesh P="0 0 0 1 0 0 0 1 0
//!          1 1 0"
//! ```

/// Format `items` as the attribute `header="..."`, returning one string per
/// output line (without line terminators).
///
/// `format` receives each chunk and returns its text. A `per_line` of zero is
/// treated as one.
pub fn write_chunked_attribute<T, F>(
    header: &str,
    items: &[T],
    per_line: usize,
    align: bool,
    format: F,
) -> Vec<String>
where
    F: Fn(&[T]) -> String,
{
    let per_line = per_line.max(1);

    if items.is_empty() {
        return vec![format!("{}=\"\"", header)];
    }
    if items.len() <= per_line {
        return vec![format!("{}=\"{}\"", header, format(items))];
    }

    let padding = if align {
        " ".repeat(header.len() + 2)
    } else {
        String::new()
    };

    let chunks: Vec<&[T]> = items.chunks(per_line).collect();
    let last = chunks.len() - 1;
    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            let body = format(chunk);
            match i {
                0 => format!("{}=\"{}", header, body),
                _ if i == last => format!("{}{}\"", padding, body),
                _ => format!("{}{}", padding, body),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn join(chunk: &[u32]) -> String {
        chunk.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_empty_list() {
        let lines = write_chunked_attribute("nverts", &[] as &[u32], 50, true, join);
        assert_eq!(lines, vec!["nverts=\"\"".to_string()]);
    }

    #[test]
    fn test_single_line() {
        let lines = write_chunked_attribute("verts", &[0u32, 1, 2], 5, true, join);
        assert_eq!(lines, vec!["verts=\"0 1 2\"".to_string()]);
    }

    #[test]
    fn test_aligned_continuation() {
        let lines = write_chunked_attribute("<mesh P", &[1u32, 2, 3, 4, 5], 2, true, join);
        assert_eq!(
            lines,
            vec![
                "<mesh P=\"1 2".to_string(),
                "         3 4".to_string(),
                "         5\"".to_string(),
            ]
        );
    }

    #[test]
    fn test_unaligned_continuation() {
        let lines = write_chunked_attribute("uv", &[1u32, 2, 3], 2, false, join);
        assert_eq!(lines, vec!["uv=\"1 2".to_string(), "3\"".to_string()]);
    }

    #[test]
    fn test_exact_multiple_closes_on_last_chunk() {
        let lines = write_chunked_attribute("x", &[1u32, 2, 3, 4], 2, true, join);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "    3 4\"");
    }
}
