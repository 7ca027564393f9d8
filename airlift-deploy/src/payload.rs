//! Fixed deployment payload
//!
//! The paths, manifest template, and workflow identifiers are compile-time
//! constants, not runtime configuration: every deployment targets the same
//! two files at the repository root and the same build workflow.

/// Path of the package manifest at the repository root
pub const MANIFEST_PATH: &str = "Package.swift";

/// Path of the deployed source file at the repository root
pub const SOURCE_PATH: &str = "main.swift";

/// Workflow file that builds the deployed source
pub const WORKFLOW_FILE: &str = "build.yml";

/// Branch the workflow is dispatched on
pub const DISPATCH_REF: &str = "main";

/// Package manifest uploaded alongside every source file
///
/// Declares the single executable target the build workflow compiles.
pub const MANIFEST_TEMPLATE: &str = r#"// swift-tools-version: 5.9
import PackageDescription

let package = Package(
    name: "SwiftIDE",
    platforms: [.iOS(.v16)],
    products: [
        .executable(name: "SwiftIDE", targets: ["SwiftIDE"])
    ],
    targets: [
        .executableTarget(
            name: "SwiftIDE",
            path: ".",
            sources: ["main.swift"]
        )
    ]
)
"#;

/// Commit message for an upserted path
pub fn commit_message(path: &str) -> String {
    format!("Update {}", path)
}
