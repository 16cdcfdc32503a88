//! Option definitions and value binding.
//!
//! An [`OptionDef`] declares one user-settable parameter: its spellings,
//! value type, arity, default, closed set of accepted values, tokenizer,
//! validators and completion sources. Binding turns the raw tokens the
//! parser collected for an option into a typed [`Value`].

use std::fmt;
use std::sync::Arc;

use crate::complete::{CompletionContext, CompletionSource};
use crate::validate::OptionCheck;
use crate::{Arity, ParsedValues, UsageError, Value, ValueType};

/// Pre-coercion transform over an option's raw tokens.
pub type Tokenizer = Arc<dyn Fn(&[String]) -> Vec<String> + Send + Sync>;

/// Supplies a value when an option is absent from the command line.
pub type DefaultValue = Arc<dyn Fn() -> Value + Send + Sync>;

/// Per-option check; appends zero or more errors.
pub type OptionValidator = Arc<dyn Fn(&OptionCheck<'_>, &mut Vec<UsageError>) + Send + Sync>;

/// Raw tokens the parser routed to one option.
#[derive(Debug, Clone, Default)]
pub(crate) struct RawTokens {
    /// The option's name appeared at least once.
    pub present: bool,
    pub tokens: Vec<String>,
}

/// Definition of a command option.
///
/// Use [`string`](OptionDef::string), [`flag`](OptionDef::flag) or
/// [`list`](OptionDef::list) to create one, then chain builder methods.
///
/// # Examples
///
/// ```
/// use kubepizza_core::{Arity, OptionDef, ValueType};
///
/// let size = OptionDef::string("--size")
///     .with_alias("-s")
///     .with_description("Pizza size")
///     .with_allowed_values(["small", "medium", "large"])
///     .with_default("medium");
///
/// assert!(size.matches("-s"));
/// assert!(size.matches("--size"));
/// assert_eq!(size.arity, Arity::ExactlyOne);
/// assert_eq!(size.default_value().and_then(|v| v.as_str().map(String::from)), Some("medium".into()));
///
/// let delivery = OptionDef::flag("--delivery");
/// assert_eq!(delivery.value_type, ValueType::Bool);
/// assert!(!delivery.takes_value());
/// ```
#[derive(Clone)]
pub struct OptionDef {
    /// Primary spelling, e.g. `--pizza`. Bound values are keyed by it.
    pub name: String,
    /// Alternative spellings, e.g. `-p`.
    pub aliases: Vec<String>,
    pub description: Option<String>,
    /// Placeholder shown in help, e.g. `<pizza>`.
    pub value_name: Option<String>,
    pub value_type: ValueType,
    pub arity: Arity,
    pub required: bool,
    /// Closed set of accepted values, compared case-insensitively.
    pub allowed_values: Option<Vec<String>>,
    pub(crate) default: Option<DefaultValue>,
    pub(crate) tokenizer: Option<Tokenizer>,
    pub(crate) validators: Vec<OptionValidator>,
    pub(crate) completions: Vec<CompletionSource>,
}

impl OptionDef {
    /// Creates an option of the given type with its default arity.
    pub fn new(name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            description: None,
            value_name: None,
            value_type,
            arity: value_type.default_arity(),
            required: false,
            allowed_values: None,
            default: None,
            tokenizer: None,
            validators: Vec::new(),
            completions: Vec::new(),
        }
    }

    /// Creates a single-valued string option.
    pub fn string(name: &str) -> Self {
        Self::new(name, ValueType::String)
    }

    /// Creates a boolean flag.
    pub fn flag(name: &str) -> Self {
        Self::new(name, ValueType::Bool)
    }

    /// Creates a multi-valued string option.
    pub fn list(name: &str) -> Self {
        Self::new(name, ValueType::StringArray)
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    pub fn with_value_name(mut self, name: &str) -> Self {
        self.value_name = Some(name.to_string());
        self
    }

    /// Marks the option as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets a constant default value.
    pub fn with_default(self, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.with_default_fn(move || value.clone())
    }

    /// Sets a default supplier, invoked only when no token was supplied.
    pub fn with_default_fn<F>(mut self, supplier: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(Arc::new(supplier));
        self
    }

    /// Restricts values to a closed set.
    ///
    /// The set doubles as a completion source.
    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_tokenizer<F>(mut self, tokenizer: F) -> Self
    where
        F: Fn(&[String]) -> Vec<String> + Send + Sync + 'static,
    {
        self.tokenizer = Some(Arc::new(tokenizer));
        self
    }

    /// Adds a per-option validator. Validators run in the order added.
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&OptionCheck<'_>, &mut Vec<UsageError>) + Send + Sync + 'static,
    {
        self.validators.push(Arc::new(validator));
        self
    }

    pub fn with_completions(mut self, source: CompletionSource) -> Self {
        self.completions.push(source);
        self
    }

    /// Adds a context-aware completion source.
    pub fn with_suggestions<F>(self, provider: F) -> Self
    where
        F: Fn(&CompletionContext<'_>) -> Vec<String> + Send + Sync + 'static,
    {
        self.with_completions(CompletionSource::Contextual(Arc::new(provider)))
    }

    /// Checks whether `token` is the primary name or an alias.
    pub fn matches(&self, token: &str) -> bool {
        self.name == token || self.aliases.iter().any(|a| a == token)
    }

    /// Primary name followed by aliases.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Returns `false` for boolean flags.
    pub fn takes_value(&self) -> bool {
        self.value_type != ValueType::Bool
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Invokes the default supplier, if any.
    pub fn default_value(&self) -> Option<Value> {
        self.default.as_ref().map(|supplier| supplier())
    }

    /// Completion sources in declaration order.
    pub fn completions(&self) -> &[CompletionSource] {
        &self.completions
    }

    /// Placeholder for help output.
    pub fn value_label(&self) -> String {
        if let Some(name) = &self.value_name {
            return name.clone();
        }
        if let Some(allowed) = &self.allowed_values {
            return allowed.join("|");
        }
        self.name.trim_start_matches('-').to_string()
    }

    /// Binds the raw tokens for this option into `values`.
    pub(crate) fn bind(
        &self,
        raw: &RawTokens,
        values: &mut ParsedValues,
        errors: &mut Vec<UsageError>,
    ) {
        if !raw.present {
            if self.required {
                errors.push(UsageError::MissingRequiredValue {
                    option: self.name.clone(),
                });
            } else if let Some(default) = &self.default {
                values.insert(&self.name, default(), false);
            }
            return;
        }

        let tokens = match &self.tokenizer {
            Some(tokenizer) => tokenizer(raw.tokens.as_slice()),
            None => raw.tokens.clone(),
        };

        let value = match self.coerce(tokens) {
            Ok(Some(value)) => value,
            Ok(None) => {
                if let Some(default) = &self.default {
                    values.insert(&self.name, default(), false);
                }
                return;
            }
            Err(err) => {
                errors.push(err);
                return;
            }
        };

        match self.restrict_to_allowed(value) {
            Ok(value) => values.insert(&self.name, value, true),
            Err(mut rejected) => errors.append(&mut rejected),
        }
    }

    /// Converts tokens to the declared type. `Ok(None)` means present
    /// without a value where that is permitted.
    fn coerce(&self, mut tokens: Vec<String>) -> Result<Option<Value>, UsageError> {
        match self.value_type {
            ValueType::Bool => match tokens.last() {
                None => Ok(Some(Value::Bool(true))),
                Some(token) => parse_bool(token)
                    .map(|b| Some(Value::Bool(b)))
                    .ok_or_else(|| UsageError::TypeCoercionFailed {
                        option: self.name.clone(),
                        value: token.clone(),
                        expected: ValueType::Bool,
                    }),
            },
            ValueType::String => match tokens.pop() {
                Some(last) => Ok(Some(Value::String(last))),
                None if self.arity == Arity::ExactlyOne => Err(UsageError::MissingOptionValue {
                    option: self.name.clone(),
                }),
                None => Ok(None),
            },
            ValueType::StringArray => {
                if tokens.is_empty() && self.arity == Arity::ExactlyOne {
                    return Err(UsageError::MissingOptionValue {
                        option: self.name.clone(),
                    });
                }
                Ok(Some(Value::List(tokens)))
            }
        }
    }

    /// Normalizes values to their allowed spelling, or reports each
    /// value outside the set.
    fn restrict_to_allowed(&self, value: Value) -> Result<Value, Vec<UsageError>> {
        let Some(allowed) = &self.allowed_values else {
            return Ok(value);
        };

        let mut errors = Vec::new();
        let mut normalize = |candidate: String| -> String {
            match allowed.iter().find(|a| a.eq_ignore_ascii_case(&candidate)) {
                Some(canonical) => canonical.clone(),
                None => {
                    errors.push(UsageError::ValueNotInAllowedSet {
                        option: self.name.clone(),
                        value: candidate.clone(),
                        allowed: allowed.clone(),
                    });
                    candidate
                }
            }
        };

        let normalized = match value {
            Value::String(s) => Value::String(normalize(s)),
            Value::List(items) => Value::List(items.into_iter().map(&mut normalize).collect()),
            other => other,
        };

        if errors.is_empty() {
            Ok(normalized)
        } else {
            Err(errors)
        }
    }
}

impl fmt::Debug for OptionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionDef")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("value_type", &self.value_type)
            .field("arity", &self.arity)
            .field("required", &self.required)
            .field("allowed_values", &self.allowed_values)
            .field("has_default", &self.default.is_some())
            .field("has_tokenizer", &self.tokenizer.is_some())
            .field("validators", &self.validators.len())
            .field("completions", &self.completions.len())
            .finish()
    }
}

/// Returns a tokenizer that splits every token on `delimiter`, trims the
/// pieces and drops empty ones.
///
/// # Examples
///
/// ```
/// let split = kubepizza_core::split_delimited(',');
/// let tokens = vec!["mozzarella, chili".to_string(), "basil,".to_string()];
/// assert_eq!(split(tokens.as_slice()), vec!["mozzarella", "chili", "basil"]);
/// ```
pub fn split_delimited(delimiter: char) -> impl Fn(&[String]) -> Vec<String> + Send + Sync + 'static {
    move |tokens: &[String]| {
        tokens
            .iter()
            .flat_map(|token| token.split(delimiter))
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }
}

/// Parses `true`/`false`, ignoring ASCII case.
pub(crate) fn parse_bool(token: &str) -> Option<bool> {
    if token.eq_ignore_ascii_case("true") {
        Some(true)
    } else if token.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
