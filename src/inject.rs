use alloc::{
    string::{String, ToString as _},
    vec::Vec,
};

use crate::{
    blueprint::{Blueprint, DependsDecl, Specifier},
    errors::ParseErrorKind,
};

/// A single dependency request parsed from a blueprint declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectRequest {
    pub(crate) name: String,
    pub(crate) optional: bool,
    pub(crate) as_factory: bool,
    pub(crate) placeholder: bool,
}

impl InjectRequest {
    /// Creates a required registry request for `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
            as_factory: false,
            placeholder: false,
        }
    }

    /// An unregistered dependency binds the absent marker instead of failing.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Binds the dependency's deferred callable instead of its value.
    #[must_use]
    pub fn as_factory(mut self) -> Self {
        self.as_factory = true;
        self
    }

    /// Leaves the parameter open for an invoke-time placeholder value.
    #[must_use]
    pub fn placeholder(mut self) -> Self {
        self.placeholder = true;
        self
    }
}

/// An invoke-time parameter an item expects to receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderArg {
    pub name: String,
    pub optional: bool,
}

/// The parsed form of a blueprint's dependency declaration: one request per
/// parameter, plus the placeholder subset in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct InjectionSpec {
    pub(crate) requests: Vec<InjectRequest>,
    pub(crate) placeholders: Vec<PlaceholderArg>,
}

pub(crate) fn parse(blueprint: &Blueprint) -> Result<InjectionSpec, ParseErrorKind> {
    let requests = match &blueprint.depends {
        DependsDecl::None => infer_all_placeholders(&blueprint.params),
        DependsDecl::Infer { placeholders } => infer_by_name(&blueprint.params, placeholders)?,
        DependsDecl::Explicit(specifiers) => parse_explicit(&blueprint.params, specifiers)?,
    };

    let placeholders = requests
        .iter()
        .filter(|request| request.placeholder)
        .map(|request| PlaceholderArg {
            name: request.name.clone(),
            optional: request.optional,
        })
        .collect();

    Ok(InjectionSpec {
        requests,
        placeholders,
    })
}

fn infer_all_placeholders(params: &[String]) -> Vec<InjectRequest> {
    params
        .iter()
        .map(|param| InjectRequest::new(param.clone()).placeholder())
        .collect()
}

fn infer_by_name(
    params: &[String],
    placeholders: &[String],
) -> Result<Vec<InjectRequest>, ParseErrorKind> {
    let mut parsed = Vec::with_capacity(placeholders.len());
    let mut invalid = Vec::new();
    for (index, entry) in placeholders.iter().enumerate() {
        let trimmed = entry.trim();
        let optional = trimmed.ends_with('?');
        let name = trimmed.trim_end_matches('?').trim();
        if name.is_empty() {
            invalid.push(index);
        } else {
            parsed.push((name.to_string(), optional));
        }
    }
    if !invalid.is_empty() {
        return Err(ParseErrorKind::InvalidPlaceholders { indexes: invalid });
    }

    Ok(params
        .iter()
        .map(|param| match parsed.iter().find(|(name, _)| name == param) {
            Some((_, true)) => InjectRequest::new(param.clone()).placeholder().optional(),
            Some((_, false)) => InjectRequest::new(param.clone()).placeholder(),
            None => InjectRequest::new(param.clone()),
        })
        .collect())
}

fn parse_explicit(
    params: &[String],
    specifiers: &[Specifier],
) -> Result<Vec<InjectRequest>, ParseErrorKind> {
    let mut requests = Vec::with_capacity(specifiers.len());
    let mut invalid = Vec::new();
    for (index, specifier) in specifiers.iter().enumerate() {
        let request = match specifier {
            Specifier::Spec(raw) => parse_specifier(raw),
            Specifier::Request(request) if request.name.trim().is_empty() => None,
            Specifier::Request(request) => Some(request.clone()),
        };
        match request {
            Some(request) => requests.push(request),
            None => invalid.push(index),
        }
    }
    if !invalid.is_empty() {
        return Err(ParseErrorKind::InvalidSpecifiers { indexes: invalid });
    }
    if requests.len() != params.len() {
        return Err(ParseErrorKind::CountMismatch {
            declared: requests.len(),
            params: params.len(),
        });
    }
    Ok(requests)
}

// Markers: trailing `?` = optional, `()` = as-factory, `*` = placeholder.
// The name is the specifier minus the marker characters.
fn parse_specifier(raw: &str) -> Option<InjectRequest> {
    let trimmed = raw.trim();
    let optional = trimmed.ends_with('?');
    let as_factory = trimmed.contains("()");
    let placeholder = trimmed.contains('*');
    let name: String = trimmed
        .chars()
        .filter(|c| !matches!(c, '?' | '(' | ')' | '*'))
        .collect();
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(InjectRequest {
        name: name.to_string(),
        optional,
        as_factory,
        placeholder,
    })
}
