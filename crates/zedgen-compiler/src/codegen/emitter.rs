//! Renders normalized definitions into Rust source through Handlebars.

use std::collections::HashMap;

use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderError, TemplateError,
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::model::{NormalizedDefinition, NormalizedModel};

use super::naming;
use super::GeneratedUnit;

/// Built-in template for one object type.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/object.rs.hbs");

const OBJECT_TEMPLATE: &str = "object";
const GENERATOR: &str = "zedgen";
const INDEX_FILE: &str = "mod.rs";

/// Errors raised while emitting code.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The template did not parse.
    #[error("invalid template: {0}")]
    InvalidTemplate(#[source] Box<TemplateError>),

    /// Rendering failed for one definition.
    #[error("failed to render '{definition}': {source}")]
    Render {
        definition: String,
        #[source]
        source: Box<RenderError>,
    },

    /// Two definitions would be written to the same file.
    #[error("definitions '{first}' and '{second}' would both be written to '{file_name}'")]
    DuplicateFileName {
        file_name: String,
        first: String,
        second: String,
    },

    /// A unit cannot be declared as a module in the index.
    #[error("'{file_name}' does not name a module with extension '{file_extension}'")]
    InvalidModuleName {
        file_name: String,
        file_extension: String,
    },
}

/// Result type for code emission.
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Options controlling the emitted code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterOptions {
    /// Crate path the generated `use` statement imports from.
    pub runtime_crate: String,
    /// Extension appended to each module stem, leading dot included.
    pub file_extension: String,
}

impl Default for EmitterOptions {
    fn default() -> Self {
        Self {
            runtime_crate: "zedgen_authz".to_string(),
            file_extension: ".rs".to_string(),
        }
    }
}

#[derive(Serialize)]
struct SubjectContext<'a> {
    object_type: &'a str,
    wildcard: bool,
}

#[derive(Serialize)]
struct RelationContext<'a> {
    name: &'a str,
    expression: String,
    subject_types: Vec<SubjectContext<'a>>,
}

#[derive(Serialize)]
struct PermissionContext<'a> {
    name: &'a str,
    expression: String,
    references: Vec<&'a str>,
}

/// Data exposed to templates.
#[derive(Serialize)]
struct TemplateContext<'a> {
    generator: &'static str,
    version: &'static str,
    runtime_crate: &'a str,
    name: &'a str,
    prefixes: &'a [String],
    path: String,
    type_name: String,
    module_name: String,
    relations: Vec<RelationContext<'a>>,
    permissions: Vec<PermissionContext<'a>>,
}

impl<'a> TemplateContext<'a> {
    fn new(definition: &'a NormalizedDefinition, options: &'a EmitterOptions) -> Self {
        let path = definition.path();
        let relations = definition
            .relations
            .iter()
            .map(|relation| RelationContext {
                name: &relation.name,
                expression: relation.expression.to_string(),
                subject_types: relation
                    .subject_types
                    .iter()
                    .map(|s| SubjectContext {
                        object_type: &s.object_type,
                        wildcard: s.wildcard,
                    })
                    .collect(),
            })
            .collect();
        let permissions = definition
            .permissions
            .iter()
            .map(|permission| PermissionContext {
                name: &permission.name,
                expression: permission.expression.to_string(),
                references: permission.expression.identifiers(),
            })
            .collect();

        Self {
            generator: GENERATOR,
            version: env!("CARGO_PKG_VERSION"),
            runtime_crate: &options.runtime_crate,
            name: &definition.name,
            prefixes: &definition.prefixes,
            type_name: naming::type_name(&path),
            module_name: naming::module_name(&definition.name),
            path,
            relations,
            permissions,
        }
    }
}

/// Template-driven code emitter.
///
/// Rendering is strict: a template referring to a field the context does not
/// carry fails instead of printing nothing. Output is not HTML-escaped.
pub struct Emitter {
    handlebars: Handlebars<'static>,
    options: EmitterOptions,
}

impl Emitter {
    /// Emitter using the built-in template.
    pub fn new(options: EmitterOptions) -> CodegenResult<Self> {
        Self::with_template(DEFAULT_TEMPLATE, options)
    }

    /// Emitter using a caller-supplied template.
    pub fn with_template(template: &str, options: EmitterOptions) -> CodegenResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars.register_helper("upper_first", Box::new(upper_first_helper));
        handlebars.register_helper("snake_to_pascal", Box::new(snake_to_pascal_helper));
        handlebars.register_helper("package_name", Box::new(package_name_helper));
        handlebars.register_helper("type_name", Box::new(type_name_helper));
        handlebars.register_helper(
            "type_name_with_underscores",
            Box::new(type_name_with_underscores_helper),
        );
        handlebars.register_helper("quote", Box::new(quote_helper));
        handlebars.register_helper("screaming_snake", Box::new(screaming_snake_helper));

        handlebars
            .register_template_string(OBJECT_TEMPLATE, template)
            .map_err(|e| CodegenError::InvalidTemplate(Box::new(e)))?;

        Ok(Self {
            handlebars,
            options,
        })
    }

    pub fn options(&self) -> &EmitterOptions {
        &self.options
    }

    /// File name for a definition's generated unit.
    pub fn file_name(&self, definition: &NormalizedDefinition) -> String {
        format!(
            "{}{}",
            naming::module_name(&definition.name),
            self.options.file_extension
        )
    }

    /// Renders one definition.
    pub fn emit(&self, definition: &NormalizedDefinition) -> CodegenResult<GeneratedUnit> {
        let context = TemplateContext::new(definition, &self.options);
        let content = self
            .handlebars
            .render(OBJECT_TEMPLATE, &context)
            .map_err(|e| CodegenError::Render {
                definition: definition.path(),
                source: Box::new(e),
            })?;

        let unit = GeneratedUnit {
            definition: context.path,
            file_name: self.file_name(definition),
            content,
        };
        debug!(
            definition = %unit.definition,
            file = %unit.file_name,
            bytes = unit.content.len(),
            "rendered definition"
        );
        Ok(unit)
    }

    /// Renders every definition of a model in name order.
    ///
    /// Nothing is returned unless every definition rendered and every file
    /// name is distinct.
    pub fn emit_all(&self, model: &NormalizedModel) -> CodegenResult<Vec<GeneratedUnit>> {
        let mut owners: HashMap<String, String> = HashMap::with_capacity(model.len());
        let mut units = Vec::with_capacity(model.len());
        for definition in model.values() {
            let unit = self.emit(definition)?;
            if let Some(first) = owners.insert(unit.file_name.clone(), unit.definition.clone()) {
                return Err(CodegenError::DuplicateFileName {
                    file_name: unit.file_name,
                    first,
                    second: unit.definition,
                });
            }
            units.push(unit);
        }
        Ok(units)
    }

    /// Module index declaring every generated unit.
    ///
    /// Each file name must be a module name followed by the configured
    /// extension. Files not ending in plain `.rs` are declared with a
    /// `#[path]` attribute.
    pub fn emit_index(&self, units: &[GeneratedUnit]) -> CodegenResult<GeneratedUnit> {
        let extension = self.options.file_extension.as_str();
        let mut modules = Vec::with_capacity(units.len());
        for unit in units {
            let module = unit
                .file_name
                .strip_suffix(extension)
                .filter(|stem| naming::is_item_name(stem))
                .ok_or_else(|| CodegenError::InvalidModuleName {
                    file_name: unit.file_name.clone(),
                    file_extension: extension.to_string(),
                })?;
            modules.push((module, unit.file_name.as_str()));
        }
        modules.sort_unstable();
        modules.dedup();

        let mut content = format!("// Code generated by {GENERATOR}. DO NOT EDIT.\n\n");
        for (module, file_name) in modules {
            if extension != ".rs" {
                content.push_str(&format!("#[path = {}]\n", naming::quote(file_name)));
            }
            content.push_str(&format!("pub mod {module};\n"));
        }

        Ok(GeneratedUnit {
            definition: String::new(),
            file_name: INDEX_FILE.to_string(),
            content,
        })
    }
}

// Handlebars helpers

fn write_transformed(
    h: &Helper,
    out: &mut dyn Output,
    transform: fn(&str) -> String,
) -> HelperResult {
    let param = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    out.write(&transform(param))?;
    Ok(())
}

fn upper_first_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    write_transformed(h, out, naming::upper_first)
}

fn snake_to_pascal_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    write_transformed(h, out, naming::snake_to_pascal)
}

fn package_name_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    write_transformed(h, out, naming::package_name)
}

fn type_name_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    write_transformed(h, out, naming::type_name)
}

fn type_name_with_underscores_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    write_transformed(h, out, naming::type_name_with_underscores)
}

fn quote_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    write_transformed(h, out, naming::quote)
}

fn screaming_snake_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    write_transformed(h, out, naming::screaming_snake)
}
