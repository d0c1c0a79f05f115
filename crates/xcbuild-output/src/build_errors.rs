//! Classifies raw `xcodebuild` / `swift build` output into a fixed taxonomy
//! of actionable build failures.
//!
//! Each signature is an independent check over the full text, so one output
//! blob can legitimately produce several [`BuildError`]s. The two generic
//! checks are the only gated ones: they run when nothing specific matched.
//! New Xcode output variants get a new check, never an edit to a working
//! one.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

use crate::destination;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildErrorKind {
    Scheme,
    Signing,
    Provisioning,
    Dependency,
    Sdk,
    Destination,
    Configuration,
    Platform,
    ProjectNotFound,
    Generic,
}

/// One classified build-configuration failure, ready for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildError {
    pub kind: BuildErrorKind,
    /// Short human label, e.g. `Scheme "Foo" not found`.
    pub title: String,
    /// Specific diagnosis, with extracted identifiers substituted in.
    pub details: String,
    /// Actionable remediation, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl BuildError {
    pub(crate) fn new(
        kind: BuildErrorKind,
        title: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            details: details.into(),
            suggestion: None,
        }
    }

    pub(crate) fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

static SCHEME_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"scheme named "([^"]+)""#).expect("scheme regex"));
static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]+)""#).expect("quoted regex"));
static SIGNING_IDENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[Ss]igning certificate "([^"]+)""#).expect("signing regex"));
static PROFILE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[Pp]rovisioning profile "([^"]+)""#).expect("profile regex")
});
static NO_PROFILES_FOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"No profiles for '([^']+)'"#).expect("profiles regex"));
static CAPABILITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"doesn't support the ([A-Za-z0-9 .-]+) capability").expect("capability regex")
});
static NO_SUCH_MODULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"no such module '([^']+)'").expect("module regex"));
static CANNOT_FIND_IN_SCOPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"cannot find '([^']+)' in scope").expect("scope regex"));
static UNRESOLVED_IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"use of unresolved identifier '([^']+)'").expect("identifier regex")
});
static UNKNOWN_PACKAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"unknown package '([^']+)' in dependencies").expect("package regex")
});
static CLONE_FAILURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[Ff]ailed to clone repository ([^\s,;]+)").expect("clone regex")
});
static REPOSITORY_NOT_FOUND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)repository '?([^'\s]+)'? (?:was |could )?not (?:be )?found").expect("repo regex")
});
static SDK_NOT_INSTALLED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z][A-Za-z ]*?\d[\d.]*) is not installed\. To use with Xcode")
        .expect("sdk regex")
});
static CONFIGURATION_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"configuration (?:named )?["']([^"']+)["']"#).expect("configuration regex")
});
static PLATFORM_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"platform:([A-Za-z ]+[A-Za-z])").expect("platform regex"));
static QUOTED_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r#"["']([^"']+)["']"#).expect("path regex"));

/// The phrase xcodebuild emits when a platform runtime is missing. Shared
/// with the destination check, which defers to the SDK check whenever this
/// appears in the same output (the missing runtime is the true root cause).
pub(crate) const SDK_NOT_INSTALLED_MARKER: &str = "is not installed. To use with Xcode";

/// Run every signature check against the full output.
///
/// Checks are non-exclusive: a single blob can yield multiple errors. The
/// two generic checks only fire when nothing specific matched, so callers
/// can rely on generic errors never duplicating a specific diagnosis.
pub fn classify_build_errors(raw_output: &str) -> Vec<BuildError> {
    let mut errors = Vec::new();

    check_scheme(raw_output, &mut errors);
    check_signing(raw_output, &mut errors);
    check_provisioning(raw_output, &mut errors);
    check_missing_module(raw_output, &mut errors);
    check_unknown_package(raw_output, &mut errors);
    check_repository(raw_output, &mut errors);
    check_sdk(raw_output, &mut errors);
    destination::check_destination(raw_output, &mut errors);
    check_configuration(raw_output, &mut errors);
    check_platform(raw_output, &mut errors);
    check_project_path(raw_output, &mut errors);

    if errors.is_empty() {
        check_generic_xcodebuild(raw_output, &mut errors);
        check_build_commands_failed(raw_output, &mut errors);
    }

    debug!(matched = errors.len(), "classified build output");
    errors
}

fn first_line_containing<'a>(raw_output: &'a str, needle: &str) -> Option<&'a str> {
    raw_output.lines().find(|line| line.contains(needle))
}

fn check_scheme(raw_output: &str, errors: &mut Vec<BuildError>) {
    let Some(line) = raw_output
        .lines()
        .find(|line| line.contains("xcodebuild: error:") && line.contains("scheme"))
    else {
        return;
    };

    let error = match SCHEME_NAME
        .captures(line)
        .or_else(|| QUOTED.captures(line))
        .map(|c| c[1].to_string())
    {
        Some(name) => BuildError::new(
            BuildErrorKind::Scheme,
            format!("Scheme \"{name}\" not found"),
            format!("The project or workspace does not contain a scheme named \"{name}\"."),
        ),
        None => BuildError::new(
            BuildErrorKind::Scheme,
            "Scheme not found",
            line.trim().to_string(),
        ),
    };

    errors.push(error.with_suggestion(
        "Run `xcodebuild -list` to see the available schemes, and make sure the scheme is shared.",
    ));
}

fn check_signing(raw_output: &str, errors: &mut Vec<BuildError>) {
    let line = raw_output.lines().find(|line| {
        line.contains("Code Signing Error")
            || line.contains("Code Sign error")
            || line.contains("No signing certificate")
            || line.contains("code signing is required")
    });
    let Some(line) = line else { return };

    let details = match SIGNING_IDENTITY.captures(line) {
        Some(caps) => format!("No signing certificate \"{}\" was found.", &caps[1]),
        None => line.trim().to_string(),
    };

    errors.push(
        BuildError::new(BuildErrorKind::Signing, "Code signing failed", details)
            .with_suggestion(
                "Check the Signing & Capabilities settings for the target, or build for a \
                 simulator destination where code signing is not required.",
            ),
    );
}

fn check_provisioning(raw_output: &str, errors: &mut Vec<BuildError>) {
    if let Some(line) = first_line_containing(raw_output, "No profiles for") {
        let details = match NO_PROFILES_FOR.captures(line) {
            Some(caps) => format!("No provisioning profiles were found for \"{}\".", &caps[1]),
            None => line.trim().to_string(),
        };
        errors.push(
            BuildError::new(BuildErrorKind::Provisioning, "Provisioning profile missing", details)
                .with_suggestion(
                    "Enable automatic signing or download the profile in Xcode ▸ Settings ▸ Accounts.",
                ),
        );
        return;
    }

    let capability_line = raw_output.lines().find(|line| {
        let lower = line.to_lowercase();
        lower.contains("provisioning profile") && lower.contains("capability")
    });
    if let Some(line) = capability_line {
        let profile = PROFILE_NAME.captures(line).map(|c| c[1].to_string());
        let capability = CAPABILITY.captures(line).map(|c| c[1].to_string());
        let details = match (profile, capability) {
            (Some(profile), Some(capability)) => format!(
                "Provisioning profile \"{profile}\" does not support the {capability} capability."
            ),
            _ => line.trim().to_string(),
        };
        errors.push(
            BuildError::new(BuildErrorKind::Provisioning, "Provisioning profile unsupported", details)
                .with_suggestion(
                    "Regenerate the provisioning profile with the required capability enabled.",
                ),
        );
    }
}

fn check_missing_module(raw_output: &str, errors: &mut Vec<BuildError>) {
    if let Some(caps) = NO_SUCH_MODULE.captures(raw_output) {
        errors.push(
            BuildError::new(
                BuildErrorKind::Dependency,
                format!("Module '{}' not found", &caps[1]),
                format!("The build cannot find the module '{}'.", &caps[1]),
            )
            .with_suggestion(
                "Check that the dependency is declared in Package.swift or linked to the target, \
                 then resolve packages again.",
            ),
        );
        return;
    }

    let symbol = CANNOT_FIND_IN_SCOPE
        .captures(raw_output)
        .or_else(|| UNRESOLVED_IDENTIFIER.captures(raw_output))
        .map(|c| c[1].to_string());
    if let Some(symbol) = symbol {
        errors.push(
            BuildError::new(
                BuildErrorKind::Dependency,
                format!("Unresolved symbol '{symbol}'"),
                format!("'{symbol}' could not be resolved; a dependency may be missing or failed to build."),
            )
            .with_suggestion("Verify the symbol's module is imported and its target builds."),
        );
    }
}

fn check_unknown_package(raw_output: &str, errors: &mut Vec<BuildError>) {
    if let Some(caps) = UNKNOWN_PACKAGE.captures(raw_output) {
        errors.push(
            BuildError::new(
                BuildErrorKind::Dependency,
                format!("Unknown package '{}'", &caps[1]),
                format!(
                    "Package.swift references '{}' in a target's dependencies, but no package \
                     with that identity is declared.",
                    &caps[1]
                ),
            )
            .with_suggestion(
                "Add the package to the `dependencies` array of Package.swift, or fix the \
                 package identity in the target dependency.",
            ),
        );
    }
}

fn check_repository(raw_output: &str, errors: &mut Vec<BuildError>) {
    // The clone failure names the URL and is the root cause, so it
    // suppresses the vaguer "repository not found" phrasing that usually
    // accompanies it in the same output.
    if let Some(caps) = CLONE_FAILURE.captures(raw_output) {
        let url = caps[1].trim_end_matches([':', '.']);
        errors.push(
            BuildError::new(
                BuildErrorKind::Dependency,
                "Package repository clone failed",
                format!("Failed to clone repository {url}."),
            )
            .with_suggestion(
                "Check the repository URL, your network connection, and any required git credentials.",
            ),
        );
        return;
    }

    if let Some(caps) = REPOSITORY_NOT_FOUND.captures(raw_output) {
        errors.push(
            BuildError::new(
                BuildErrorKind::Dependency,
                "Package repository not found",
                format!("The repository {} could not be found.", &caps[1]),
            )
            .with_suggestion("Check the repository URL in Package.swift."),
        );
    }
}

fn check_sdk(raw_output: &str, errors: &mut Vec<BuildError>) {
    if !raw_output.contains(SDK_NOT_INSTALLED_MARKER) {
        return;
    }

    let error = match SDK_NOT_INSTALLED.captures(raw_output) {
        Some(caps) => {
            let sdk = caps[1].trim().to_string();
            BuildError::new(
                BuildErrorKind::Sdk,
                format!("{sdk} SDK not installed"),
                format!("{sdk} is not installed, so no destination on that platform is usable."),
            )
            .with_suggestion(format!(
                "Download the platform with `xcodebuild -downloadPlatform {}` or in \
                 Xcode ▸ Settings ▸ Platforms.",
                sdk.split_whitespace().next().unwrap_or("iOS")
            ))
        }
        None => BuildError::new(
            BuildErrorKind::Sdk,
            "Required SDK not installed",
            "A platform runtime required by the requested destination is not installed.",
        )
        .with_suggestion("Install the missing platform in Xcode ▸ Settings ▸ Platforms."),
    };

    errors.push(error);
}

fn check_configuration(raw_output: &str, errors: &mut Vec<BuildError>) {
    let line = raw_output.lines().find(|line| {
        let lower = line.to_lowercase();
        (lower.contains("configuration") && lower.contains("not found"))
            || lower.contains("invalid configuration")
            || lower.contains("does not contain a build configuration")
    });
    let Some(line) = line else { return };

    let error = match CONFIGURATION_NAME.captures(line) {
        Some(caps) => BuildError::new(
            BuildErrorKind::Configuration,
            format!("Configuration \"{}\" not found", &caps[1]),
            format!("The project does not define a build configuration named \"{}\".", &caps[1]),
        ),
        None => BuildError::new(
            BuildErrorKind::Configuration,
            "Build configuration not found",
            line.trim().to_string(),
        ),
    };

    errors.push(error.with_suggestion(
        "Use one of the configurations reported by `xcodebuild -list` (typically Debug or Release).",
    ));
}

fn check_platform(raw_output: &str, errors: &mut Vec<BuildError>) {
    let line = raw_output.lines().find(|line| {
        (line.contains("platform") && line.contains("not supported"))
            || line.contains("Unsupported platform")
    });
    let Some(line) = line else { return };

    let mut error = BuildError::new(
        BuildErrorKind::Platform,
        "Platform not supported by scheme",
        line.trim().to_string(),
    );

    // Prefer the synthetic summary injected by upstream platform
    // pre-validation; fall back to platform tokens in xcodebuild's own
    // destination listing.
    let available = first_line_containing(raw_output, "Available platforms:")
        .map(|line| line.trim_start().trim_start_matches("Available platforms:").trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            let platforms = extract_platform_tokens(destination_section(raw_output, "Available destinations")?);
            if platforms.is_empty() {
                None
            } else {
                Some(platforms.join(", "))
            }
        });

    if let Some(platforms) = available {
        error = error.with_suggestion(format!("Use one of the supported platforms: {platforms}."));
    } else {
        error = error.with_suggestion(
            "Check which platforms the scheme supports with `xcodebuild -showdestinations`.",
        );
    }

    errors.push(error);
}

fn check_project_path(raw_output: &str, errors: &mut Vec<BuildError>) {
    // Accessibility-subsystem log noise can carry "does not exist"
    // substrings that have nothing to do with the project path.
    let line = raw_output.lines().find(|line| {
        !line.contains("[AXLoading]")
            && line.contains("does not exist")
            && (line.contains(".xcodeproj")
                || line.contains(".xcworkspace")
                || line.contains("project")
                || line.contains("workspace"))
    });
    let Some(line) = line else { return };

    let details = match QUOTED_PATH.captures(line) {
        Some(caps) => format!("No project or workspace exists at {}.", &caps[1]),
        None => line.trim().to_string(),
    };

    errors.push(
        BuildError::new(BuildErrorKind::ProjectNotFound, "Project or workspace not found", details)
            .with_suggestion("Check the project path passed to the tool; it must point at an existing .xcodeproj or .xcworkspace."),
    );
}

fn check_generic_xcodebuild(raw_output: &str, errors: &mut Vec<BuildError>) {
    if let Some(line) = first_line_containing(raw_output, "xcodebuild: error:") {
        errors.push(BuildError::new(
            BuildErrorKind::Generic,
            "xcodebuild reported an error",
            line.trim().to_string(),
        ));
    }
}

fn check_build_commands_failed(raw_output: &str, errors: &mut Vec<BuildError>) {
    let mut lines = raw_output.lines();
    for line in lines.by_ref() {
        if line.contains("The following build commands failed:") {
            break;
        }
    }

    let failed: Vec<&str> = lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(3)
        .collect();
    if failed.is_empty() {
        return;
    }

    errors.push(BuildError::new(
        BuildErrorKind::Generic,
        "Build commands failed",
        failed.join("\n"),
    ));
}

/// Unique `platform:X` tokens in a block of xcodebuild destination output,
/// in sorted order. Also used by callers that pre-validate a requested
/// platform against `-showdestinations` output.
pub fn extract_platform_tokens(text: &str) -> Vec<String> {
    let unique: BTreeSet<String> = PLATFORM_TOKEN
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .collect();
    unique.into_iter().collect()
}

/// The indented destination listing that follows a section header such as
/// `Available destinations for the "App" scheme:`. Ends at the first blank
/// line.
pub(crate) fn destination_section<'a>(raw_output: &'a str, header: &str) -> Option<&'a str> {
    let start = raw_output.find(header)?;
    let after_header = &raw_output[start..];
    let body_start = after_header.find('\n')? + 1;
    let body = &after_header[body_start..];
    let body_end = body
        .find("\n\n")
        .or_else(|| body.find("\n\r\n"))
        .unwrap_or(body.len());
    Some(&body[..body_end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_error_extracts_name() {
        let output = r#"xcodebuild: error: The project named "App" does not contain a scheme named "Foo"."#;
        let errors = classify_build_errors(output);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, BuildErrorKind::Scheme);
        assert!(errors[0].title.contains("\"Foo\""));
        assert!(errors[0].suggestion.is_some());
    }

    #[test]
    fn signing_error_extracts_identity() {
        let output = "error: No signing certificate \"iOS Distribution\" found: No \"iOS Distribution\" signing certificate matching team ID \"ABC123\".";
        let errors = classify_build_errors(output);
        assert_eq!(errors[0].kind, BuildErrorKind::Signing);
        assert!(errors[0].details.contains("iOS Distribution"));
    }

    #[test]
    fn provisioning_profile_missing() {
        let output = "error: No profiles for 'com.example.app' were found: Xcode couldn't find any iOS App Development provisioning profiles matching 'com.example.app'.";
        let errors = classify_build_errors(output);
        assert_eq!(errors[0].kind, BuildErrorKind::Provisioning);
        assert!(errors[0].details.contains("com.example.app"));
    }

    #[test]
    fn provisioning_capability_unsupported() {
        let output = r#"error: Provisioning profile "App Dev" doesn't support the Push Notifications capability."#;
        let errors = classify_build_errors(output);
        assert_eq!(errors[0].kind, BuildErrorKind::Provisioning);
        assert!(errors[0].details.contains("App Dev"));
        assert!(errors[0].details.contains("Push Notifications"));
    }

    #[test]
    fn missing_module_extracts_name() {
        let output = "/App/Sources/main.swift:1:8: error: no such module 'Alamofire'";
        let errors = classify_build_errors(output);
        assert!(errors.iter().any(|e| {
            e.kind == BuildErrorKind::Dependency && e.title.contains("Alamofire")
        }));
    }

    #[test]
    fn unknown_package_extracts_name() {
        let output = "error: unknown package 'swift-log' in dependencies of target 'App'; valid packages are: 'swift-argument-parser'";
        let errors = classify_build_errors(output);
        assert_eq!(errors[0].kind, BuildErrorKind::Dependency);
        assert!(errors[0].title.contains("swift-log"));
    }

    #[test]
    fn clone_failure_suppresses_repository_not_found() {
        let output = "\
error: Failed to clone repository https://github.com/example/missing.git:\n\
    Cloning into bare repository\n\
    remote: Repository not found.\n";
        let errors = classify_build_errors(output);
        let dependency: Vec<_> = errors
            .iter()
            .filter(|e| e.kind == BuildErrorKind::Dependency)
            .collect();
        assert_eq!(dependency.len(), 1);
        assert!(dependency[0].details.contains("https://github.com/example/missing.git"));
    }

    #[test]
    fn repository_not_found_without_clone_line() {
        let output = "error: repository 'https://github.com/example/gone.git' not found";
        let errors = classify_build_errors(output);
        assert_eq!(errors[0].kind, BuildErrorKind::Dependency);
        assert!(errors[0].details.contains("gone.git"));
    }

    #[test]
    fn sdk_not_installed_extracts_name_and_version() {
        let output = "tvOS 17.0 is not installed. To use with Xcode, first download and install the platform";
        let errors = classify_build_errors(output);
        assert_eq!(errors[0].kind, BuildErrorKind::Sdk);
        assert!(errors[0].title.contains("tvOS 17.0"));
    }

    #[test]
    fn configuration_not_found_extracts_name() {
        let output = r#"xcodebuild: error: The project "App" does not contain a build configuration named "Staging"."#;
        let errors = classify_build_errors(output);
        assert!(errors.iter().any(|e| {
            e.kind == BuildErrorKind::Configuration && e.title.contains("Staging")
        }));
    }

    #[test]
    fn platform_unsupported_uses_synthetic_platform_line() {
        let output = "\
error: the platform watchOS is not supported by this scheme\n\
Available platforms: iOS, iOS Simulator, macOS\n";
        let errors = classify_build_errors(output);
        let platform = errors
            .iter()
            .find(|e| e.kind == BuildErrorKind::Platform)
            .expect("platform error");
        assert!(
            platform
                .suggestion
                .as_deref()
                .unwrap()
                .contains("iOS, iOS Simulator, macOS")
        );
    }

    #[test]
    fn platform_unsupported_recovers_from_destination_listing() {
        let output = "\
error: the platform watchOS is not supported by this scheme\n\
Available destinations for the \"App\" scheme:\n\
\t{ platform:macOS, arch:arm64, id:abc }\n\
\t{ platform:iOS Simulator, id:def, OS:17.5, name:iPhone 15 }\n\
\n\
done\n";
        let errors = classify_build_errors(output);
        let platform = errors
            .iter()
            .find(|e| e.kind == BuildErrorKind::Platform)
            .expect("platform error");
        let suggestion = platform.suggestion.as_deref().unwrap();
        assert!(suggestion.contains("iOS Simulator"));
        assert!(suggestion.contains("macOS"));
    }

    #[test]
    fn project_not_found_ignores_axloading_noise() {
        let output = "[AXLoading] The bundle at path project/Foo.axbundle does not exist";
        let errors = classify_build_errors(output);
        assert!(errors.iter().all(|e| e.kind != BuildErrorKind::ProjectNotFound));
    }

    #[test]
    fn project_not_found_extracts_path() {
        let output = "xcodebuild: error: The project 'Missing.xcodeproj' does not exist.";
        let errors = classify_build_errors(output);
        assert!(errors.iter().any(|e| {
            e.kind == BuildErrorKind::ProjectNotFound && e.details.contains("Missing.xcodeproj")
        }));
        // The specific match must have suppressed the generic check.
        assert!(errors.iter().all(|e| e.kind != BuildErrorKind::Generic));
    }

    #[test]
    fn generic_xcodebuild_error_only_without_specific_match() {
        let output = "xcodebuild: error: Unknown build service failure.";
        let errors = classify_build_errors(output);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, BuildErrorKind::Generic);
        assert!(errors[0].details.contains("Unknown build service failure"));
    }

    #[test]
    fn build_commands_failed_captures_up_to_three_lines() {
        let output = "\
** BUILD FAILED **\n\
\n\
The following build commands failed:\n\
\tCompileSwift normal arm64 Feed.swift\n\
\tCompileSwift normal arm64 Profile.swift\n\
\tCompileSwift normal arm64 Settings.swift\n\
\tCompileSwift normal arm64 Search.swift\n";
        let errors = classify_build_errors(output);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, BuildErrorKind::Generic);
        assert_eq!(errors[0].details.lines().count(), 3);
    }

    #[test]
    fn clean_output_classifies_nothing() {
        let output = "Build settings resolved\nCompiling sources\n** BUILD SUCCEEDED **\n";
        assert!(classify_build_errors(output).is_empty());
    }

    #[test]
    fn classifier_is_idempotent() {
        let output = r#"xcodebuild: error: The project does not contain a scheme named "Foo"."#;
        assert_eq!(classify_build_errors(output), classify_build_errors(output));
    }

    #[test]
    fn platform_tokens_are_unique_and_sorted() {
        let text = "{ platform:iOS Simulator, id:a }\n{ platform:macOS, id:b }\n{ platform:iOS Simulator, id:c }";
        assert_eq!(
            extract_platform_tokens(text),
            vec!["iOS Simulator".to_string(), "macOS".to_string()]
        );
    }
}
