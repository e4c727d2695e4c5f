//! Tool registry and argument-to-argv translation
//!
//! Maps a validated (tool name, arguments) pair onto a concrete uv
//! command line. The mapping is a data-driven rule table keyed by tool
//! name; adding a tool means adding a catalog entry in [`crate::tools`]
//! and one rule here.

use std::path::PathBuf;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::executor::CommandInvocation;
use crate::tools::{ToolDefinition, get_tool_definitions};

/// Name of the external package-manager binary
pub const UV_BINARY: &str = "uv";

/// Builds the subcommand tokens for one tool from validated arguments
type TokenBuilder = fn(&Value) -> Vec<String>;

/// One entry of the translation table
struct TranslationRule {
    name: &'static str,
    build: TokenBuilder,
}

/// Translation rules, one per catalog entry. Flags precede variadic
/// positional lists; token order is fixed per rule.
const RULES: &[TranslationRule] = &[
    TranslationRule {
        name: "uv_init",
        build: |args| {
            let mut tokens = vec!["init".to_string()];
            if let Some(name) = non_empty_str(args, "name") {
                tokens.push(name.to_string());
            }
            if let Some(python) = non_empty_str(args, "python") {
                tokens.push("--python".to_string());
                tokens.push(python.to_string());
            }
            tokens
        },
    },
    TranslationRule {
        name: "uv_add",
        build: |args| {
            let mut tokens = vec!["add".to_string()];
            if flag(args, "dev") {
                tokens.push("--dev".to_string());
            }
            tokens.extend(string_list(args, "packages"));
            tokens
        },
    },
    TranslationRule {
        name: "uv_remove",
        build: |args| {
            let mut tokens = vec!["remove".to_string()];
            tokens.extend(string_list(args, "packages"));
            tokens
        },
    },
    TranslationRule {
        name: "uv_sync",
        build: |args| {
            let mut tokens = vec!["sync".to_string()];
            if flag(args, "frozen") {
                tokens.push("--frozen".to_string());
            }
            tokens
        },
    },
    TranslationRule {
        name: "uv_run",
        build: |args| {
            let mut tokens = vec!["run".to_string()];
            tokens.extend(string_list(args, "command"));
            tokens
        },
    },
    TranslationRule {
        name: "uv_pip_list",
        build: |args| {
            let mut tokens = vec!["pip".to_string(), "list".to_string()];
            if non_empty_str(args, "format") == Some("json") {
                tokens.push("--format=json".to_string());
            }
            tokens
        },
    },
    TranslationRule {
        name: "uv_lock",
        build: |args| {
            let mut tokens = vec!["lock".to_string()];
            if flag(args, "check") {
                tokens.push("--check".to_string());
            }
            tokens
        },
    },
    TranslationRule {
        name: "uv_python_install",
        build: |args| {
            let mut tokens = vec!["python".to_string(), "install".to_string()];
            if let Some(version) = non_empty_str(args, "version") {
                tokens.push(version.to_string());
            }
            tokens
        },
    },
    TranslationRule {
        name: "uv_python_list",
        build: |args| {
            let mut tokens = vec!["python".to_string(), "list".to_string()];
            if flag(args, "installed_only") {
                tokens.push("--only-installed".to_string());
            }
            tokens
        },
    },
    TranslationRule {
        name: "uv_version",
        build: |_| vec!["--version".to_string()],
    },
];

fn non_empty_str<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(|v| v.as_str()).filter(|s| !s.is_empty())
}

fn flag(args: &Value, key: &str) -> bool {
    args.get(key).and_then(|v| v.as_bool()).unwrap_or(false)
}

fn string_list(args: &Value, key: &str) -> Vec<String> {
    args.get(key)
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

/// The fixed catalog of uv tools plus their translation rules
pub struct ToolRegistry {
    definitions: Vec<ToolDefinition>,
}

impl ToolRegistry {
    /// Build the registry from the static catalog
    pub fn new() -> Self {
        Self {
            definitions: get_tool_definitions(),
        }
    }

    /// The full tool catalog in stable declaration order
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    /// Translate a tool call into a [`CommandInvocation`].
    ///
    /// Validates the arguments against the tool's input schema first;
    /// nothing is spawned for a call that fails validation. The resolved
    /// working directory is supplied by the caller (see
    /// [`crate::workspace`]).
    pub fn translate(
        &self,
        name: &str,
        arguments: &Value,
        cwd: PathBuf,
    ) -> Result<CommandInvocation> {
        let rule = RULES
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| Error::UnknownTool(name.to_string()))?;

        let definition = self
            .definitions
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| Error::UnknownTool(name.to_string()))?;

        validate_arguments(definition, arguments)?;

        let mut argv = vec![UV_BINARY.to_string()];
        argv.extend((rule.build)(arguments));

        Ok(CommandInvocation { argv, cwd })
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Check the argument mapping against the tool's JSON schema:
/// required keys must be present, and supplied values must match the
/// declared property types.
fn validate_arguments(definition: &ToolDefinition, arguments: &Value) -> Result<()> {
    let schema = &definition.input_schema;

    if let Some(required) = schema.get("required").and_then(|v| v.as_array()) {
        for key in required.iter().filter_map(|v| v.as_str()) {
            if arguments.get(key).map_or(true, |v| v.is_null()) {
                return Err(Error::invalid_arguments(format!(
                    "missing required argument '{}' for tool '{}'",
                    key, definition.name
                )));
            }
        }
    }

    let Some(properties) = schema.get("properties").and_then(|v| v.as_object()) else {
        return Ok(());
    };

    for (key, prop) in properties {
        let Some(value) = arguments.get(key) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        let expected = prop.get("type").and_then(|v| v.as_str()).unwrap_or("");
        let conformant = match expected {
            "string" => value.is_string(),
            "boolean" => value.is_boolean(),
            "array" => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            _ => true,
        };
        if !conformant {
            return Err(Error::invalid_arguments(format!(
                "argument '{}' for tool '{}' must be of type {}",
                key, definition.name, expected
            )));
        }
    }

    Ok(())
}
