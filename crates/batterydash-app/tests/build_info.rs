//! Build information tests
//!
//! The build id is stamped by build.rs as `YYYY.MM.DD+g<short-sha>`, or
//! `YYYY.MM.DD+local` when git is unavailable.

use batterydash_app::BUILD_ID;

#[test]
fn test_build_id_format() {
    println!("Build ID: {}", BUILD_ID);

    let (date_part, revision) = BUILD_ID
        .split_once('+')
        .expect("Build ID should have date and revision parts separated by +");

    let date_pieces: Vec<&str> = date_part.split('.').collect();
    assert_eq!(date_pieces.len(), 3, "Date should be YYYY.MM.DD");
    assert_eq!(date_pieces[0].len(), 4, "Year should be 4 digits");

    let month: u8 = date_pieces[1].parse().expect("Month should be a number");
    assert!((1..=12).contains(&month), "Month should be 01-12");
    let day: u8 = date_pieces[2].parse().expect("Day should be a number");
    assert!((1..=31).contains(&day), "Day should be 01-31");

    if revision != "local" {
        let sha = revision
            .strip_prefix('g')
            .expect("Revision should start with 'g'");
        assert!(!sha.is_empty(), "Short SHA should not be empty");
        assert!(
            sha.chars().all(|c| c.is_ascii_hexdigit()),
            "Short SHA should contain only hex characters"
        );
    }
}
