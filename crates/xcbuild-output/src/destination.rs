//! Sub-classification of `Unable to find a destination matching` failures.
//!
//! The same xcodebuild message covers several distinct root causes: the
//! runtime for the requested platform is missing, the device id is stale,
//! the device exists on a different OS version, the device name is wrong,
//! or the scheme simply never builds for that platform. The checks below
//! re-diagnose in the same order an engineer reads the output: ineligible
//! destinations first, then the requested specifier against the available
//! listing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::build_errors::{
    BuildError, BuildErrorKind, SDK_NOT_INSTALLED_MARKER, destination_section,
};

const DESTINATION_MARKER: &str = "Unable to find a destination matching";

static SPECIFIER_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Unable to find a destination matching the provided destination specifier:\s*\{([^}]*)\}")
        .expect("specifier regex")
});
static SPECIFIER_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"id:([0-9A-Fa-f-]+)").expect("id regex"));
static SPECIFIER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"name:([^,}]+)").expect("name regex"));
static SPECIFIER_PLATFORM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"platform:([^,}]+)").expect("platform regex"));

/// What the caller asked xcodebuild for, pulled out of the echoed
/// destination specifier.
#[derive(Debug, Default, PartialEq, Eq)]
struct RequestedDestination {
    platform: Option<String>,
    id: Option<String>,
    name: Option<String>,
}

pub(crate) fn check_destination(raw_output: &str, errors: &mut Vec<BuildError>) {
    if !raw_output.contains(DESTINATION_MARKER) {
        return;
    }

    // When a platform runtime is missing, every destination on that
    // platform lands in the ineligible listing and the destination error is
    // just a symptom. The SDK check has already reported the root cause.
    if raw_output.contains(SDK_NOT_INSTALLED_MARKER) {
        return;
    }

    let requested = parse_specifier(raw_output);
    let available = destination_section(raw_output, "Available destinations");

    // A requested platform that never appears in the available listing
    // means no destination on that platform exists at all, regardless of
    // which id or name was asked for.
    if let (Some(platform), Some(available)) = (&requested.platform, available) {
        if !available.contains(&format!("platform:{platform}")) {
            errors.push(
                BuildError::new(
                    BuildErrorKind::Destination,
                    format!("No destinations for platform {platform}"),
                    format!(
                        "The requested destination asks for platform:{platform}, but no available \
                         destination offers that platform."
                    ),
                )
                .with_suggestion(format!(
                    "Create a simulator for {platform} or pick a platform from the available \
                     destinations listing."
                )),
            );
            return;
        }
    }

    if let Some(id) = &requested.id {
        let error = match available {
            // OS versions in the listing mean concrete simulators exist;
            // the usual cause is an id that exists under a different
            // runtime version than the one requested.
            Some(section) if section.contains("OS:") => BuildError::new(
                BuildErrorKind::Destination,
                "Destination OS version mismatch",
                format!(
                    "No destination matched id {id}. Destinations exist for this scheme, so the \
                     device is most likely running an OS version the request does not match."
                ),
            )
            .with_suggestion(
                "Drop the OS constraint from the destination, or pick a device id from the \
                 available destinations listing.",
            ),
            Some(_) => BuildError::new(
                BuildErrorKind::Destination,
                "Destination id not found",
                format!("No simulator or device with id {id} exists."),
            )
            .with_suggestion(
                "Run `xcrun simctl list devices` and use the UDID of an existing device.",
            ),
            None => BuildError::new(
                BuildErrorKind::Destination,
                "Destination could not be used",
                format!("The destination with id {id} could not be used for this scheme."),
            ),
        };
        errors.push(error);
        return;
    }

    if let Some(name) = &requested.name {
        errors.push(
            BuildError::new(
                BuildErrorKind::Destination,
                format!("No device named \"{name}\""),
                format!("No available destination is named \"{name}\"."),
            )
            .with_suggestion(
                "Check the device name against `xcrun simctl list devices`; names must match \
                 exactly, including generation suffixes.",
            ),
        );
        return;
    }

    errors.push(
        BuildError::new(
            BuildErrorKind::Destination,
            "Destination not found",
            "xcodebuild could not match the requested destination specifier.",
        )
        .with_suggestion(
            "Run `xcodebuild -showdestinations` for the scheme to see what it can build for.",
        ),
    );
}

fn parse_specifier(raw_output: &str) -> RequestedDestination {
    let Some(caps) = SPECIFIER_BLOCK.captures(raw_output) else {
        return RequestedDestination::default();
    };
    let block = &caps[1];

    RequestedDestination {
        platform: SPECIFIER_PLATFORM
            .captures(block)
            .map(|c| c[1].trim().to_string()),
        id: SPECIFIER_ID.captures(block).map(|c| c[1].trim().to_string()),
        name: SPECIFIER_NAME
            .captures(block)
            .map(|c| c[1].trim().to_string()),
    }
}
