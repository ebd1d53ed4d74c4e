use semver::{BuildMetadata, Prerelease, Version, VersionReq};

/// Package name plugins declare their host version requirement against,
/// i.e. the `engines` key checked during load.
pub const HOST_PACKAGE_NAME: &str = "hearth";

/// Protocol engine package bundled with the host. Plugins must not ship
/// their own copy as a runtime dependency.
pub const PROTOCOL_PACKAGE_NAME: &str = "hearth-hap";

/// `engines` key naming the runtime version requirement.
pub const RUNTIME_ENGINE_NAME: &str = "node";

/// Versions of the running host and runtime, supplied by the embedding
/// application when loading plugins.
#[derive(Debug, Clone)]
pub struct HostVersions {
    /// Version of the hearth host itself.
    pub host: Version,
    /// Version of the underlying runtime.
    pub runtime: Version,
}

impl HostVersions {
    pub fn new(host: Version, runtime: Version) -> Self {
        Self { host, runtime }
    }
}

/// Range check that also admits prerelease builds of otherwise matching
/// versions.
///
/// `VersionReq::matches` rejects prereleases unless the range itself names
/// one; the host version axis must accept a host running e.g. `1.8.0-beta.2`
/// against a plugin requiring `^1.6.0`.
pub fn satisfies_including_prerelease(req: &VersionReq, version: &Version) -> bool {
    if req.matches(version) {
        return true;
    }
    if version.pre.is_empty() {
        return false;
    }
    let mut release = version.clone();
    release.pre = Prerelease::EMPTY;
    release.build = BuildMetadata::EMPTY;
    req.matches(&release)
}
