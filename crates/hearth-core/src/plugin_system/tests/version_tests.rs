#![cfg(test)]

use semver::{Version, VersionReq};

use crate::plugin_system::version::satisfies_including_prerelease;

fn req(s: &str) -> VersionReq {
    VersionReq::parse(s).unwrap()
}

fn version(s: &str) -> Version {
    Version::parse(s).unwrap()
}

#[test]
fn release_within_range_matches() {
    assert!(satisfies_including_prerelease(&req("^1.6.0"), &version("1.8.0")));
}

#[test]
fn release_outside_range_rejected() {
    assert!(!satisfies_including_prerelease(&req("^2.0.0"), &version("1.8.0")));
}

#[test]
fn prerelease_of_matching_release_is_admitted() {
    let r = req("^1.6.0");
    let v = version("1.8.0-beta.2");
    // The plain semver check rejects prereleases the range does not name.
    assert!(!r.matches(&v));
    assert!(satisfies_including_prerelease(&r, &v));
}

#[test]
fn prerelease_of_non_matching_release_is_rejected() {
    assert!(!satisfies_including_prerelease(
        &req("^1.6.0"),
        &version("2.0.0-beta.1")
    ));
}

#[test]
fn range_naming_a_prerelease_still_works() {
    assert!(satisfies_including_prerelease(
        &req(">=1.8.0-beta.0"),
        &version("1.8.0-beta.2")
    ));
}
