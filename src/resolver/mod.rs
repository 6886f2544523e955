//! Metadata resolution for dependency records.
//!
//! The manifest formats carry no descriptive metadata, so license,
//! upgrade, and vulnerability information comes from a
//! [`MetadataResolver`]. The bundled [`StaticResolver`] answers from
//! fixed lookup tables with a configurable fallback for unknown
//! packages; it performs no network or file I/O and is a pure function
//! of its inputs plus the configured fallback policy.

use crate::parser::Ecosystem;
use crate::tree::{Severity, Vulnerability};

/// Descriptive metadata for one package.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageMetadata {
    /// SPDX-like license identifier, when known.
    pub license: Option<String>,
    /// Newest version known for the package, when any.
    pub latest_version: Option<String>,
    /// Source repository link.
    pub repository_url: Option<String>,
    /// Project homepage.
    pub homepage: Option<String>,
    /// Known vulnerabilities.
    pub vulnerabilities: Vec<Vulnerability>,
}

/// Supplies descriptive metadata for package names.
///
/// Implementations must be total: an unknown package yields a metadata
/// value shaped by the implementation's fallback policy, never an
/// error.
pub trait MetadataResolver {
    /// Resolves metadata for a package in the given ecosystem.
    fn resolve(&self, package_name: &str, ecosystem: Ecosystem) -> PackageMetadata;
}

/// License policy applied to packages absent from the lookup tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackLicense {
    /// Leave unknown packages unlicensed.
    None,
    /// Assign a fixed identifier to every unknown package.
    Fixed(String),
    /// Pick from the ecosystem's candidate list, indexed by a stable
    /// hash of the package name. Deterministic: the same name always
    /// maps to the same license.
    ByNameHash,
}

impl FallbackLicense {
    fn license_for(&self, package_name: &str, ecosystem: Ecosystem) -> Option<String> {
        match self {
            FallbackLicense::None => None,
            FallbackLicense::Fixed(id) => Some(id.clone()),
            FallbackLicense::ByNameHash => {
                let candidates = license_candidates(ecosystem);
                Some(candidates[stable_hash(package_name) % candidates.len()].to_string())
            }
        }
    }
}

/// Multiplicative string hash, stable across builds and platforms.
fn stable_hash(s: &str) -> usize {
    s.bytes()
        .fold(0usize, |h, b| h.wrapping_mul(31).wrapping_add(b as usize))
}

/// Short license candidate lists per ecosystem, used by
/// [`FallbackLicense::ByNameHash`].
fn license_candidates(ecosystem: Ecosystem) -> &'static [&'static str] {
    match ecosystem {
        Ecosystem::Npm => &["MIT", "Apache-2.0", "BSD-3-Clause", "GPL-3.0", "ISC"],
        Ecosystem::Pip => &["MIT", "Apache-2.0", "BSD-3-Clause", "GPL-3.0", "PSF-2.0"],
        Ecosystem::Maven => &["Apache-2.0", "MIT", "BSD-3-Clause", "GPL-3.0", "LGPL-2.1"],
    }
}

/// Table-driven resolver with illustrative data for well-known
/// packages.
#[derive(Debug, Clone)]
pub struct StaticResolver {
    fallback: FallbackLicense,
}

impl StaticResolver {
    /// Creates a resolver with the given fallback policy.
    pub fn new(fallback: FallbackLicense) -> Self {
        Self { fallback }
    }
}

impl Default for StaticResolver {
    fn default() -> Self {
        Self::new(FallbackLicense::ByNameHash)
    }
}

impl MetadataResolver for StaticResolver {
    fn resolve(&self, package_name: &str, ecosystem: Ecosystem) -> PackageMetadata {
        let license = known_license(package_name, ecosystem)
            .map(str::to_string)
            .or_else(|| self.fallback.license_for(package_name, ecosystem));

        let (latest_version, repository_url, homepage) = known_details(package_name, ecosystem);

        PackageMetadata {
            license,
            latest_version: latest_version.map(str::to_string),
            repository_url: repository_url.map(str::to_string),
            homepage: homepage.map(str::to_string),
            vulnerabilities: known_vulnerabilities(package_name, ecosystem),
        }
    }
}

fn known_license(name: &str, ecosystem: Ecosystem) -> Option<&'static str> {
    let table: &[(&str, &str)] = match ecosystem {
        Ecosystem::Npm => &[
            ("react", "MIT"),
            ("react-dom", "MIT"),
            ("typescript", "Apache-2.0"),
            ("tailwindcss", "MIT"),
            ("vite", "MIT"),
            ("lucide-react", "ISC"),
            ("d3", "BSD-3-Clause"),
            ("lodash", "MIT"),
            ("axios", "MIT"),
            ("express", "MIT"),
            ("webpack", "MIT"),
            ("babel", "MIT"),
            ("eslint", "MIT"),
            ("prettier", "MIT"),
            ("jest", "MIT"),
            ("postcss", "MIT"),
            ("autoprefixer", "MIT"),
        ],
        Ecosystem::Pip => &[
            ("flask", "BSD-3-Clause"),
            ("django", "BSD-3-Clause"),
            ("requests", "Apache-2.0"),
            ("urllib3", "MIT"),
            ("numpy", "BSD-3-Clause"),
            ("pytest", "MIT"),
        ],
        Ecosystem::Maven => &[
            ("org.springframework:spring-core", "Apache-2.0"),
            ("org.apache.commons:commons-lang3", "Apache-2.0"),
            ("com.google.guava:guava", "Apache-2.0"),
            ("junit:junit", "EPL-1.0"),
        ],
    };

    table
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, license)| *license)
}

/// Latest version, repository, and homepage for a handful of packages.
/// Illustrative, not resolved from a registry.
fn known_details(
    name: &str,
    ecosystem: Ecosystem,
) -> (
    Option<&'static str>,
    Option<&'static str>,
    Option<&'static str>,
) {
    match (ecosystem, name) {
        (Ecosystem::Npm, "react") => (
            Some("19.1.0"),
            Some("https://github.com/facebook/react"),
            Some("https://react.dev"),
        ),
        (Ecosystem::Npm, "lodash") => (
            Some("4.17.21"),
            Some("https://github.com/lodash/lodash"),
            Some("https://lodash.com"),
        ),
        (Ecosystem::Npm, "typescript") => (
            Some("5.9.2"),
            Some("https://github.com/microsoft/TypeScript"),
            Some("https://www.typescriptlang.org"),
        ),
        (Ecosystem::Npm, "express") => (
            Some("5.1.0"),
            Some("https://github.com/expressjs/express"),
            Some("https://expressjs.com"),
        ),
        (Ecosystem::Pip, "flask") => (
            Some("3.1.0"),
            Some("https://github.com/pallets/flask"),
            Some("https://flask.palletsprojects.com"),
        ),
        (Ecosystem::Pip, "requests") => (
            Some("2.32.3"),
            Some("https://github.com/psf/requests"),
            None,
        ),
        (Ecosystem::Maven, "org.springframework:spring-core") => (
            Some("6.2.1"),
            Some("https://github.com/spring-projects/spring-framework"),
            Some("https://spring.io"),
        ),
        _ => (None, None, None),
    }
}

/// Known-vulnerable packages with fixed, illustrative advisories.
fn known_vulnerabilities(name: &str, ecosystem: Ecosystem) -> Vec<Vulnerability> {
    match (ecosystem, name) {
        (Ecosystem::Npm, "lodash") => vec![Vulnerability::new(
            Severity::High,
            "Prototype pollution in zipObjectDeep",
        )
        .with_url("https://osv.dev/vulnerability/GHSA-p6mc-m468-83gw")],
        (Ecosystem::Npm, "axios") => vec![Vulnerability::new(
            Severity::Moderate,
            "Server-side request forgery via crafted redirect",
        )],
        (Ecosystem::Npm, "express") => vec![Vulnerability::new(
            Severity::Low,
            "Open redirect in malformed URL handling",
        )],
        (Ecosystem::Pip, "requests") => vec![Vulnerability::new(
            Severity::Moderate,
            "Proxy-Authorization header leaked on redirect",
        )],
        (Ecosystem::Pip, "urllib3") => vec![Vulnerability::new(
            Severity::High,
            "Request smuggling via malformed chunked encoding",
        )],
        (Ecosystem::Pip, "django") => vec![Vulnerability::new(
            Severity::High,
            "SQL injection in column aliases",
        )],
        (Ecosystem::Maven, "org.springframework:spring-core") => vec![Vulnerability::new(
            Severity::High,
            "Remote code execution via data binding",
        )],
        (Ecosystem::Maven, "org.apache.commons:commons-lang3") => vec![Vulnerability::new(
            Severity::Moderate,
            "Uncontrolled recursion in string interpolation",
        )],
        _ => Vec::new(),
    }
}
