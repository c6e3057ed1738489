//! Per-field filter descriptors and the query-string grammar that fills them.
//!
//! A criteria query string looks like
//! `id.greaterThan=10&title.contains=Order&code.in=A,B&code.specified=true`.
//! Each `<field>.<operator>=<value>` pair populates one sub-field of the
//! matching filter; keys that do not name a process field (`page`, `size`,
//! `sort`, ...) are left for other extractors.

use std::borrow::Cow;
use std::str::FromStr;

use strum::{Display, EnumString};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown filter operator '{operator}' for field '{field}'")]
    UnknownOperator { field: String, operator: String },

    #[error("operator '{operator}' is not supported for field '{field}'")]
    UnsupportedOperator { field: String, operator: Operator },

    #[error("invalid value '{value}' for '{key}'")]
    InvalidValue { key: String, value: String },

    #[error("query string is not valid UTF-8 after decoding: {0}")]
    Encoding(String),
}

/// Filter operators accepted after the `.` in a criteria key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum Operator {
    Equals,
    NotEquals,
    In,
    NotIn,
    Specified,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Contains,
    DoesNotContain,
}

/// Filter for fields with a natural ordering (the `id` column)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeFilter<T> {
    pub equals: Option<T>,
    pub not_equals: Option<T>,
    pub in_list: Option<Vec<T>>,
    pub not_in_list: Option<Vec<T>>,
    pub specified: Option<bool>,
    pub greater_than: Option<T>,
    pub less_than: Option<T>,
    pub greater_than_or_equal: Option<T>,
    pub less_than_or_equal: Option<T>,
}

impl<T> Default for RangeFilter<T> {
    fn default() -> Self {
        Self {
            equals: None,
            not_equals: None,
            in_list: None,
            not_in_list: None,
            specified: None,
            greater_than: None,
            less_than: None,
            greater_than_or_equal: None,
            less_than_or_equal: None,
        }
    }
}

impl<T: FromStr> RangeFilter<T> {
    fn apply(&mut self, field: &str, operator: Operator, value: &str) -> Result<(), FilterError> {
        let key = format!("{}.{}", field, operator);
        match operator {
            Operator::Equals => self.equals = Some(parse_scalar(&key, value)?),
            Operator::NotEquals => self.not_equals = Some(parse_scalar(&key, value)?),
            Operator::In => extend_list(&mut self.in_list, parse_list(&key, value)?),
            Operator::NotIn => extend_list(&mut self.not_in_list, parse_list(&key, value)?),
            Operator::Specified => self.specified = Some(parse_scalar(&key, value)?),
            Operator::GreaterThan => self.greater_than = Some(parse_scalar(&key, value)?),
            Operator::LessThan => self.less_than = Some(parse_scalar(&key, value)?),
            Operator::GreaterThanOrEqual => {
                self.greater_than_or_equal = Some(parse_scalar(&key, value)?)
            }
            Operator::LessThanOrEqual => self.less_than_or_equal = Some(parse_scalar(&key, value)?),
            Operator::Contains | Operator::DoesNotContain => {
                return Err(FilterError::UnsupportedOperator {
                    field: field.to_string(),
                    operator,
                });
            }
        }
        Ok(())
    }
}

/// Filter for text fields (`title`, `code`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringFilter {
    pub equals: Option<String>,
    pub not_equals: Option<String>,
    pub in_list: Option<Vec<String>>,
    pub not_in_list: Option<Vec<String>>,
    pub specified: Option<bool>,
    pub contains: Option<String>,
    pub does_not_contain: Option<String>,
}

impl StringFilter {
    fn apply(&mut self, field: &str, operator: Operator, value: &str) -> Result<(), FilterError> {
        let key = format!("{}.{}", field, operator);
        match operator {
            Operator::Equals => self.equals = Some(value.to_string()),
            Operator::NotEquals => self.not_equals = Some(value.to_string()),
            Operator::In => extend_list(&mut self.in_list, parse_list(&key, value)?),
            Operator::NotIn => extend_list(&mut self.not_in_list, parse_list(&key, value)?),
            Operator::Specified => self.specified = Some(parse_scalar(&key, value)?),
            Operator::Contains => self.contains = Some(value.to_string()),
            Operator::DoesNotContain => self.does_not_contain = Some(value.to_string()),
            Operator::GreaterThan
            | Operator::LessThan
            | Operator::GreaterThanOrEqual
            | Operator::LessThanOrEqual => {
                return Err(FilterError::UnsupportedOperator {
                    field: field.to_string(),
                    operator,
                });
            }
        }
        Ok(())
    }
}

/// Optional filters for each process field; all present filters must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessCriteria {
    pub id: Option<RangeFilter<i64>>,
    pub title: Option<StringFilter>,
    pub code: Option<StringFilter>,
}

impl ProcessCriteria {
    /// Parse criteria from a raw (still percent-encoded) query string.
    pub fn from_query(query: Option<&str>) -> Result<Self, FilterError> {
        let mut criteria = Self::default();
        let Some(query) = query else {
            return Ok(criteria);
        };

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode(raw_key)?;
            let Some((field, operator)) = key.split_once('.') else {
                continue;
            };
            if !matches!(field, "id" | "title" | "code") {
                continue;
            }

            let operator =
                Operator::from_str(operator).map_err(|_| FilterError::UnknownOperator {
                    field: field.to_string(),
                    operator: operator.to_string(),
                })?;
            let value = decode(raw_value)?;

            match field {
                "id" => criteria
                    .id
                    .get_or_insert_with(RangeFilter::default)
                    .apply(field, operator, &value)?,
                "title" => criteria
                    .title
                    .get_or_insert_with(StringFilter::default)
                    .apply(field, operator, &value)?,
                _ => criteria
                    .code
                    .get_or_insert_with(StringFilter::default)
                    .apply(field, operator, &value)?,
            }
        }

        Ok(criteria)
    }
}

fn decode(raw: &str) -> Result<Cow<'_, str>, FilterError> {
    if !raw.contains(['%', '+']) {
        return Ok(Cow::Borrowed(raw));
    }
    urlencoding::decode(&raw.replace('+', " "))
        .map(|decoded| Cow::Owned(decoded.into_owned()))
        .map_err(|e| FilterError::Encoding(e.to_string()))
}

fn parse_scalar<T: FromStr>(key: &str, value: &str) -> Result<T, FilterError> {
    value.parse().map_err(|_| FilterError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_list<T: FromStr>(key: &str, value: &str) -> Result<Vec<T>, FilterError> {
    value
        .split(',')
        .map(|item| parse_scalar(key, item))
        .collect()
}

fn extend_list<T>(target: &mut Option<Vec<T>>, values: Vec<T>) {
    target.get_or_insert_with(Vec::new).extend(values);
}
