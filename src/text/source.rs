//! Text sources: random generation and file loading

use super::{Text, DEFAULT_SENTINEL};
use anyhow::{ensure, Context, Result};
use memmap2::Mmap;
use rand::Rng;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Generate a text of `n` symbols: `n - 1` symbols drawn uniformly from
/// `[1, alphabet_size]`, then the sentinel `0`.
///
/// `n == 0` yields the empty text.
pub fn random_text<R: Rng + ?Sized>(n: usize, alphabet_size: u16, rng: &mut R) -> Result<Text> {
    ensure!(
        (1..=255).contains(&alphabet_size),
        "alphabet size must be in [1, 255], got {}",
        alphabet_size
    );

    if n == 0 {
        return Text::from_terminated(Vec::new());
    }

    let upper = alphabet_size as u8;
    let body: Vec<u8> = (0..n - 1).map(|_| rng.gen_range(1..=upper)).collect();
    Text::with_sentinel(body, DEFAULT_SENTINEL)
}

/// Load a text from a file.
///
/// Line terminators are dropped so the lines are concatenated, the body is
/// truncated to `limit - 1` bytes when a limit is given, and the sentinel
/// `0` is appended.
pub fn load_text(path: &Path, limit: Option<usize>) -> Result<Text> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let len = file
        .metadata()
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .len();

    let mut body = Vec::with_capacity(len as usize);
    if len > 0 {
        // SAFETY: the mapping is read once and dropped before returning
        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("Failed to map {}", path.display()))?;
        body.extend(mmap.iter().copied().filter(|&b| b != b'\n' && b != b'\r'));
    }

    if let Some(limit) = limit {
        body.truncate(limit.saturating_sub(1));
    }

    debug!(path = %path.display(), bytes = body.len(), "loaded text body");
    Text::with_sentinel(body, DEFAULT_SENTINEL)
        .with_context(|| format!("{} cannot be indexed", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    #[test]
    fn test_random_text_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let text = random_text(100, 4, &mut rng).unwrap();

        assert_eq!(text.len(), 100);
        assert_eq!(text.sentinel(), Some(0));
        assert!(text.as_bytes()[..99].iter().all(|&b| (1..=4).contains(&b)));
    }

    #[test]
    fn test_random_text_deterministic() {
        let a = random_text(64, 26, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = random_text(64, 26, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_text_edge_cases() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(random_text(0, 4, &mut rng).unwrap().is_empty());
        assert_eq!(random_text(1, 4, &mut rng).unwrap().as_bytes(), &[0]);
        assert!(random_text(10, 0, &mut rng).is_err());
        assert!(random_text(10, 256, &mut rng).is_err());
    }

    #[test]
    fn test_load_text_concatenates_lines() {
        let path = std::env::temp_dir().join(format!("fpst_load_{}.txt", std::process::id()));
        {
            let mut file = File::create(&path).unwrap();
            write!(file, "ban\nana\r\n").unwrap();
        }

        let text = load_text(&path, None).unwrap();
        assert_eq!(text.as_bytes(), b"banana\x00");

        let limited = load_text(&path, Some(4)).unwrap();
        assert_eq!(limited.as_bytes(), b"ban\x00");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_text_missing_file() {
        let path = std::env::temp_dir().join("fpst_definitely_missing.txt");
        assert!(load_text(&path, None).is_err());
    }
}
