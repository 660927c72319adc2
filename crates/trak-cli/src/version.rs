//! Semver parsing and bumping for the workspace version.
//!
//! The version lives in `.trak/config.yaml`; `trak version --bump` rewrites
//! it there.

/// Which component of the version to increment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bump {
    /// x.y.Z
    Patch,
    /// x.Y.0
    Minor,
    /// X.0.0
    Major,
}

/// Parse "major.minor.patch", treating missing or unparsable components as 0.
pub fn parse_version(version: &str) -> (u64, u64, u64) {
    let mut parts = version
        .split('.')
        .map(|p| p.trim().parse::<u64>().unwrap_or(0));
    (
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
    )
}

/// Compute the bumped version string.
pub fn bump_version(version: &str, bump: Bump) -> String {
    let (major, minor, patch) = parse_version(version);
    match bump {
        Bump::Major => format!("{}.0.0", major + 1),
        Bump::Minor => format!("{}.{}.0", major, minor + 1),
        Bump::Patch => format!("{}.{}.{}", major, minor, patch + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::patch("1.0.0", Bump::Patch, "1.0.1")]
    #[case::minor("1.0.3", Bump::Minor, "1.1.0")]
    #[case::major("1.4.2", Bump::Major, "2.0.0")]
    #[case::zero("0.0.0", Bump::Patch, "0.0.1")]
    fn bump_increments_the_right_component(
        #[case] current: &str,
        #[case] bump: Bump,
        #[case] expected: &str,
    ) {
        assert_eq!(bump_version(current, bump), expected);
    }

    #[rstest]
    #[case::short("1.2", (1, 2, 0))]
    #[case::garbage("1.x.3", (1, 0, 3))]
    #[case::empty("", (0, 0, 0))]
    fn parse_tolerates_partial_versions(#[case] version: &str, #[case] expected: (u64, u64, u64)) {
        assert_eq!(parse_version(version), expected);
    }
}
