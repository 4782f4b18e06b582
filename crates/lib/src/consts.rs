//! Names and fixed paths shared across the crate.

/// Name of the package tool whose global install root is searched.
pub const APP_NAME: &str = "pika";

/// Overrides the global prefix verbatim when set.
pub const PREFIX_VAR: &str = "PREFIX";

/// Windows local application data directory.
pub const LOCAL_APP_DATA_VAR: &str = "LOCALAPPDATA";

/// Windows roaming application data directory.
pub const APP_DATA_VAR: &str = "APPDATA";

/// npm's global prefix, in the spellings npm itself honours.
pub const NPM_PREFIX_VARS: [&str; 2] = ["npm_config_prefix", "NPM_CONFIG_PREFIX"];

/// JavaScript runtime used to evaluate the inference toolchain.
pub const NODE_BINARY_VAR: &str = "PACKTYPES_NODE";

pub const DEFAULT_NODE_BINARY: &str = "node";

/// Manifest value advertised for the declaration artifact.
pub const TYPES_ENTRY: &str = "dist-types/index.d.ts";

pub const TYPES_DIR: &str = "dist-types";

pub const DECLARATION_FILE: &str = "index.d.ts";

/// Compiled CommonJS entry produced by the node build step.
pub const NODE_ENTRY: &str = "dist-node/index.js";

pub const MANIFEST_FILE: &str = "package.json";

pub const NODE_MODULES: &str = "node_modules";

/// Package name of the compiler toolchain.
pub const TOOLCHAIN_PACKAGE: &str = "typescript";

/// Toolchain export used for best-effort declaration inference.
pub const INFERENCE_EXPORT: &str = "generateTypesForModule";

/// Module name handed to the inference export.
pub const INFERRED_MODULE_NAME: &str = "AutoGeneratedTypings";
