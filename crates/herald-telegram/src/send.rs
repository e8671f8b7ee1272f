//! Message splitting for the Telegram gateway.
//!
//! Telegram caps messages at 4096 characters; oversized text is split on
//! line boundaries, with a hard character-boundary split as a last resort
//! for a single line that cannot fit.

/// Maximum characters per Telegram message.
const CHUNK_MAX: usize = 4096;

/// Split `text` into chunks of at most [`CHUNK_MAX`] bytes.
pub fn split_chunks(text: &str) -> Vec<String> {
    if text.len() <= CHUNK_MAX {
        return vec![text.to_string()];
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    for line in text.split('\n') {
        let cost = if current.is_empty() {
            line.len()
        } else {
            1 + line.len()
        };
        if !current.is_empty() && current.len() + cost > CHUNK_MAX {
            chunks.push(std::mem::take(&mut current));
        }
        if line.len() > CHUNK_MAX {
            hard_split(line, &mut chunks);
            continue;
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Cut an over-long line at UTF-8 character boundaries.
fn hard_split(mut line: &str, out: &mut Vec<String>) {
    while line.len() > CHUNK_MAX {
        let mut at = CHUNK_MAX;
        while !line.is_char_boundary(at) {
            at -= 1;
        }
        out.push(line[..at].to_string());
        line = &line[at..];
    }
    if !line.is_empty() {
        out.push(line.to_string());
    }
}
