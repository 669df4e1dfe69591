//! Default configuration values

/// Default directory holding per-application manifest subtrees
pub const DEFAULT_APPS_DIR: &str = "apps";

/// Default publish directory (catalog plus artifacts)
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Project configuration file name
pub const CONFIG_FILE: &str = "xdcrepo.toml";

/// Catalog document name inside the publish directory
pub const CATALOG_FILE: &str = "meta.json";

/// File-name suffix that marks a manifest
pub const MANIFEST_SUFFIX: &str = ".json";

/// Extension of published source archives
pub const SOURCE_ARCHIVE_EXT: &str = "tar.gz";

/// Extension of published application bundles
pub const BUNDLE_EXT: &str = "xdc";

/// Source archive name the build leaves in its output directory
pub const BUILD_SOURCE_ARCHIVE: &str = "source.tar.gz";

/// Bundle name the build command must leave in its output directory
pub const BUILD_BUNDLE: &str = "app.xdc";

/// Mount point of the output directory inside the build container
pub const CONTAINER_OUTPUT_DIR: &str = "/out";

/// Checkout location inside the build container
pub const CONTAINER_SOURCE_DIR: &str = "/build";

/// Shell used to run the build script inside the container
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Prefix of ephemeral build directories
pub const TEMP_DIR_PREFIX: &str = "xdcbld";

/// Catalog indentation (matches previously published catalogs)
pub const CATALOG_INDENT: &[u8] = b"    ";
