use rand::Rng;
use rand::prelude::SliceRandom;

/// `l..h` in uniformly random order
pub fn random_perm<R: Rng>(l: usize, h:usize, rng: &mut R) -> Vec<usize> {
    let mut perm : Vec<usize> = (l..h).collect();
    perm.shuffle(rng);
    return perm;
}

/// first `n` characters of the file stem of `path`
pub fn short_stem(path: &std::path::Path, n: usize) -> String {
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    return stem.chars().take(n).collect();
}

#[test]
fn test_random_perm() {
    let mut rng = rand::thread_rng();
    let mut p = random_perm(3, 9, &mut rng);
    assert_eq!(p.len(), 6);
    p.sort();
    assert_eq!(p, vec![3, 4, 5, 6, 7, 8]);
    assert!(random_perm(4, 4, &mut rng).is_empty());
}

#[test]
fn test_short_stem() {
    use std::path::Path;
    assert_eq!(short_stem(Path::new("inputs/brock200_2.clq"), 3), "bro");
    assert_eq!(short_stem(Path::new("k4"), 3), "k4");
    assert_eq!(short_stem(Path::new(""), 3), "");
}
