//! Naming helpers for code generation
//!
//! Derives file stems, route segments and Go identifiers from model names.

use inflector::Inflector;

/// Go keywords plus identifiers the generated controllers declare or import.
/// A local variable named like one of these would not compile or would
/// shadow something the handler needs.
const RESERVED_IDENTIFIERS: &[&str] = &[
    // keywords
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
    // predeclared
    "append", "bool", "error", "false", "int", "len", "nil", "string", "true", "uint",
    // controller locals and imports
    "c", "content", "db", "dbpkg", "enc", "err", "fieldMap", "fieldMaps", "fields", "gin",
    "helper", "http", "id", "index", "json", "models", "ok", "parameter", "queryFields",
    "ver", "version",
];

/// Suffix appended to identifiers that would clash
const CLASH_SUFFIX: &str = "Item";

/// Naming helpers used by the template contexts
pub struct TemplateHelpers;

impl TemplateHelpers {
    /// Convert string to `snake_case`
    ///
    /// # Examples
    ///
    /// ```
    /// # use apig::scaffold::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_snake_case("UserProfile"), "user_profile");
    /// assert_eq!(TemplateHelpers::to_snake_case("HTTPRequest"), "http_request");
    /// ```
    #[must_use]
    pub fn to_snake_case(input: &str) -> String {
        input.to_snake_case()
    }

    /// Convert string to camelCase
    ///
    /// # Examples
    ///
    /// ```
    /// # use apig::scaffold::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_camel_case("UserProfile"), "userProfile");
    /// assert_eq!(TemplateHelpers::to_camel_case("User"), "user");
    /// ```
    #[must_use]
    pub fn to_camel_case(input: &str) -> String {
        input.to_camel_case()
    }

    /// Pluralize a word
    ///
    /// # Examples
    ///
    /// ```
    /// # use apig::scaffold::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::pluralize("User"), "Users");
    /// assert_eq!(TemplateHelpers::pluralize("Category"), "Categories");
    /// ```
    #[must_use]
    pub fn pluralize(input: &str) -> String {
        input.to_plural()
    }

    /// Lowercase words for documentation prose
    ///
    /// # Examples
    ///
    /// ```
    /// # use apig::scaffold::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_label("UserProfile"), "user profile");
    /// assert_eq!(TemplateHelpers::to_label("Users"), "users");
    /// ```
    #[must_use]
    pub fn to_label(input: &str) -> String {
        Self::to_snake_case(input).replace('_', " ")
    }

    /// File stem for per-model outputs (`controllers/{stem}.go`)
    #[must_use]
    pub fn file_stem(model: &str) -> String {
        Self::to_snake_case(model)
    }

    /// URL path segment for the model's collection
    ///
    /// # Examples
    ///
    /// ```
    /// # use apig::scaffold::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::route_segment("User"), "users");
    /// assert_eq!(TemplateHelpers::route_segment("UserProfile"), "user_profiles");
    /// assert_eq!(TemplateHelpers::route_segment("Category"), "categories");
    /// ```
    #[must_use]
    pub fn route_segment(model: &str) -> String {
        Self::to_snake_case(&Self::pluralize(model))
    }

    /// Local variable name for a single instance
    #[must_use]
    pub fn var_name(model: &str) -> String {
        let singular = Self::safe_identifier(&Self::to_camel_case(model));
        if singular == Self::var_plural(model) {
            format!("{singular}{CLASH_SUFFIX}")
        } else {
            singular
        }
    }

    /// Local variable name for a collection
    #[must_use]
    pub fn var_plural(model: &str) -> String {
        Self::safe_identifier(&Self::to_camel_case(&Self::pluralize(model)))
    }

    /// Append [`CLASH_SUFFIX`] when `ident` is reserved in generated code
    #[must_use]
    pub fn safe_identifier(ident: &str) -> String {
        if RESERVED_IDENTIFIERS.contains(&ident) {
            format!("{ident}{CLASH_SUFFIX}")
        } else {
            ident.to_string()
        }
    }
}
