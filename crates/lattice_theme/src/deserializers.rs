//! Field deserializers for theme documents. Lengths accept bare numbers
//! (pixels) or suffixed strings: `"14px"`, `"1.25rem"`, `"150%"`.

use gpui::{AbsoluteLength, DefiniteLength, Pixels, SharedString, px, rems};
use serde::{Deserialize, Deserializer, de::Error};
use smallvec::SmallVec;

use crate::ThemeVariant;

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrFloat {
    String(String),
    Float(f32),
}

pub fn de_pixels<'de, D>(deserializer: D) -> Result<Pixels, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrFloat::deserialize(deserializer)? {
        StringOrFloat::Float(value) => Ok(px(value)),

        StringOrFloat::String(string) => {
            let Some(stripped) = string.strip_suffix("px") else {
                return Err(D::Error::custom("expected a number or a 'px' string"));
            };

            stripped
                .parse::<f32>()
                .map(px)
                .map_err(|_| D::Error::custom(format!("'{string}' is not a pixel value")))
        }
    }
}

pub fn de_abs_length<'de, D>(deserializer: D) -> Result<AbsoluteLength, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrFloat::deserialize(deserializer)? {
        StringOrFloat::Float(value) => Ok(AbsoluteLength::Pixels(px(value))),

        StringOrFloat::String(string) => {
            if let Some(stripped) = string.strip_suffix("rem")
                && let Ok(value) = stripped.parse::<f32>()
            {
                return Ok(AbsoluteLength::Rems(rems(value)));
            }
            if let Some(stripped) = string.strip_suffix("px")
                && let Ok(value) = stripped.parse::<f32>()
            {
                return Ok(AbsoluteLength::Pixels(px(value)));
            }

            Err(D::Error::custom(format!(
                "'{string}' is not a 'px' or 'rem' length"
            )))
        }
    }
}

pub fn de_def_length<'de, D>(deserializer: D) -> Result<DefiniteLength, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrFloat::deserialize(deserializer)? {
        StringOrFloat::Float(value) => Ok(DefiniteLength::Absolute(AbsoluteLength::Pixels(px(
            value,
        )))),

        StringOrFloat::String(string) => {
            if let Some(stripped) = string.strip_suffix('%')
                && let Ok(value) = stripped.parse::<f32>()
            {
                return Ok(DefiniteLength::Fraction(value / 100.));
            }
            if let Some(stripped) = string.strip_suffix("rem")
                && let Ok(value) = stripped.parse::<f32>()
            {
                return Ok(DefiniteLength::Absolute(AbsoluteLength::Rems(rems(value))));
            }
            if let Some(stripped) = string.strip_suffix("px")
                && let Ok(value) = stripped.parse::<f32>()
            {
                return Ok(DefiniteLength::Absolute(AbsoluteLength::Pixels(px(value))));
            }

            Err(D::Error::custom(format!(
                "'{string}' is not a 'px', 'rem' or '%' length"
            )))
        }
    }
}

pub fn de_font_stack<'de, D>(deserializer: D) -> Result<SmallVec<[SharedString; 1]>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(SharedString),
        Many(SmallVec<[SharedString; 1]>),
    }

    match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(family) => Ok(SmallVec::from_buf([family])),
        OneOrMany::Many(families) => {
            if families.is_empty() {
                return Err(D::Error::custom("a font stack can't be empty"));
            }
            Ok(families)
        }
    }
}

pub fn de_variants<'de, D>(deserializer: D) -> Result<SmallVec<[ThemeVariant; 2]>, D::Error>
where
    D: Deserializer<'de>,
{
    let variants = SmallVec::deserialize(deserializer)?;

    if variants.is_empty() {
        return Err(D::Error::custom("a theme needs at least one variant"));
    }

    Ok(variants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct PixelsDoc(#[serde(deserialize_with = "de_pixels")] Pixels);

    #[derive(Deserialize)]
    struct AbsDoc(#[serde(deserialize_with = "de_abs_length")] AbsoluteLength);

    #[derive(Deserialize)]
    struct DefDoc(#[serde(deserialize_with = "de_def_length")] DefiniteLength);

    #[derive(Deserialize)]
    struct StackDoc(#[serde(deserialize_with = "de_font_stack")] SmallVec<[SharedString; 1]>);

    #[test]
    fn pixels_accept_numbers_and_px_strings() {
        assert_eq!(serde_json::from_str::<PixelsDoc>("12.5").unwrap().0, px(12.5));
        assert_eq!(
            serde_json::from_str::<PixelsDoc>("\"8px\"").unwrap().0,
            px(8.)
        );
        assert!(serde_json::from_str::<PixelsDoc>("\"8rem\"").is_err());
    }

    #[test]
    fn absolute_lengths_accept_px_and_rem() {
        assert_eq!(
            serde_json::from_str::<AbsDoc>("\"1.5rem\"").unwrap().0,
            AbsoluteLength::Rems(rems(1.5))
        );
        assert_eq!(
            serde_json::from_str::<AbsDoc>("\"14px\"").unwrap().0,
            AbsoluteLength::Pixels(px(14.))
        );
        assert!(serde_json::from_str::<AbsDoc>("\"14%\"").is_err());
    }

    #[test]
    fn definite_lengths_accept_percentages() {
        assert_eq!(
            serde_json::from_str::<DefDoc>("\"150%\"").unwrap().0,
            DefiniteLength::Fraction(1.5)
        );
        assert_eq!(
            serde_json::from_str::<DefDoc>("20").unwrap().0,
            DefiniteLength::Absolute(AbsoluteLength::Pixels(px(20.)))
        );
    }

    #[test]
    fn font_stacks_accept_one_or_many() {
        let one = serde_json::from_str::<StackDoc>("\"Inter\"").unwrap().0;
        assert_eq!(one.len(), 1);

        let many = serde_json::from_str::<StackDoc>("[\"Inter\", \"sans-serif\"]")
            .unwrap()
            .0;
        assert_eq!(many.len(), 2);

        assert!(serde_json::from_str::<StackDoc>("[]").is_err());
    }
}
