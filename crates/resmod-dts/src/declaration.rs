//! Declaration file rendering.

use resmod_core::ResourceModule;

/// Banner written at the top of every generated file.
pub const HEADER: &str = "\
// ************************************************************************
// Code generated by resmod. DO NOT EDIT.
// ************************************************************************

";

/// Default indentation of declaration members.
pub const DEFAULT_TAB: &str = "  ";

/// Render one `export const <key>: string;` line per key.
pub fn serialize_module(module: &ResourceModule, tab: &str) -> String {
    let mut code = String::new();
    for key in module.keys() {
        code.push_str(&format!("{tab}export const {key}: string;\n"));
    }
    code
}

/// Render one `<key>: string` member per key, for an object type literal.
pub fn serialize_module_as_variable(module: &ResourceModule, tab: &str) -> String {
    let mut code = String::new();
    for key in module.keys() {
        code.push_str(&format!("{tab}{key}: string\n"));
    }
    code
}

/// A resource module bound to the module name it is declared under.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Name used in `declare module "<name>"`
    pub module_name: String,

    /// Identifiers to declare
    pub module: ResourceModule,
}

impl Declaration {
    pub fn new(module_name: impl Into<String>, module: ResourceModule) -> Self {
        let mut module_name = module_name.into();
        while module_name.len() > 1 && module_name.ends_with('/') {
            module_name.pop();
        }
        Self {
            module_name,
            module,
        }
    }

    /// Render as an ambient module declaration.
    pub fn render(&self) -> String {
        format!(
            "{HEADER}declare module \"{}\" {{\n{}}}\n",
            self.module_name,
            serialize_module(&self.module, DEFAULT_TAB)
        )
    }

    /// Render as a default exported variable, for `declarationDir` output.
    pub fn render_variable(&self) -> String {
        format!(
            "{HEADER}declare var mod: {{\n{}}}\nexport default mod;",
            serialize_module_as_variable(&self.module, DEFAULT_TAB)
        )
    }
}
