//! Canonical rendering of a configuration value.

use crate::error::IniError;
use crate::schema::Schema;
use crate::value::ScalarValue;
use log::{debug, warn};

/// Render `config` as one `[section]` block per schema section, separated by a
/// single blank line, with `key=value` lines in declaration order.
pub(crate) fn render<T>(schema: &Schema<T>, config: &T) -> Result<String, IniError> {
    let mut out = String::new();
    for (index, section) in schema.sections().iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push('[');
        out.push_str(section.name());
        out.push_str("]\n");

        for field in section.fields() {
            let value = field.get(config);
            if value.kind() != field.kind() {
                return Err(IniError::UnsupportedType {
                    section: section.name().to_string(),
                    key: field.name().to_string(),
                    type_name: field.type_name(),
                });
            }
            if let ScalarValue::String(text) = &value
                && let Some(hazard) = lossy_string(text)
            {
                warn!(
                    "value of {}.{} {hazard} and will not decode back intact",
                    section.name(),
                    field.name()
                );
            }
            out.push_str(field.name());
            out.push('=');
            out.push_str(&value.to_string());
            out.push('\n');
        }
    }
    debug!(
        "encoded config (sections={}, bytes={})",
        schema.sections().len(),
        out.len()
    );
    Ok(out)
}

/// Describe why `text` would not survive a decode, if it would not.
fn lossy_string(text: &str) -> Option<&'static str> {
    if text.contains(['\n', '\r']) {
        Some("contains a line break")
    } else if text.trim() != text {
        Some("has surrounding whitespace")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{CoercionError, IniError};
    use crate::shape::{Accessor, Member, Shape};
    use crate::value::{Scalar, ScalarKind, ScalarValue};
    use crate::Schema;
    use pretty_assertions::assert_eq;

    /// Declares itself a string but hands back integers.
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Liar(u8);

    impl Scalar for Liar {
        const KIND: ScalarKind = ScalarKind::String;

        fn to_value(&self) -> ScalarValue {
            ScalarValue::UnsignedInt(u64::from(self.0))
        }

        fn from_value(value: ScalarValue) -> Result<Self, CoercionError> {
            Ok(Self(u8::from_value(value)?))
        }
    }

    #[derive(Debug, Default)]
    struct Section {
        name: String,
        liar: Liar,
    }

    #[derive(Debug, Default)]
    struct Root {
        first: Section,
        second: Section,
    }

    fn name(this: &Section) -> &String {
        &this.name
    }
    fn name_mut(this: &mut Section) -> &mut String {
        &mut this.name
    }
    fn liar(this: &Section) -> &Liar {
        &this.liar
    }
    fn liar_mut(this: &mut Section) -> &mut Liar {
        &mut this.liar
    }
    fn first(this: &Root) -> &Section {
        &this.first
    }
    fn first_mut(this: &mut Root) -> &mut Section {
        &mut this.first
    }
    fn second(this: &Root) -> &Section {
        &this.second
    }
    fn second_mut(this: &mut Root) -> &mut Section {
        &mut this.second
    }

    fn section_shape(with_liar: bool) -> Shape<Section> {
        let mut members = vec![Member::of("name", name, name_mut)];
        if with_liar {
            members.push(Member::new(
                "liar",
                Shape::Scalar(Accessor::new(liar, liar_mut)),
            ));
        }
        Shape::Struct(members)
    }

    fn schema(with_liar: bool) -> Schema<Root> {
        Schema::from_shape(Shape::Struct(vec![
            Member::new("first", section_shape(false).project(first, first_mut)),
            Member::new("second", section_shape(with_liar).project(second, second_mut)),
        ]))
        .expect("schema")
    }

    #[test]
    fn separates_sections_with_one_blank_line() {
        let mut root = Root::default();
        root.first.name = "a".to_string();
        root.second.name = "b".to_string();

        let text = super::render(&schema(false), &root).expect("render");
        assert_eq!(text, "[first]\nname=a\n\n[second]\nname=b\n");
    }

    #[test]
    fn rejects_values_that_disagree_with_declared_kind() {
        let err = super::render(&schema(true), &Root::default()).unwrap_err();
        match err {
            IniError::UnsupportedType { section, key, .. } => {
                assert_eq!(section, "second");
                assert_eq!(key, "liar");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn flags_strings_that_decode_differently() {
        assert_eq!(super::lossy_string("plain value"), None);
        assert_eq!(super::lossy_string("a\nb"), Some("contains a line break"));
        assert_eq!(super::lossy_string(" padded"), Some("has surrounding whitespace"));
        assert_eq!(super::lossy_string("tail\t"), Some("has surrounding whitespace"));
    }

    #[test]
    fn padded_strings_render_unchanged() {
        let mut root = Root::default();
        root.first.name = "  a ".to_string();
        let text = super::render(&schema(false), &root).expect("render");
        assert!(text.starts_with("[first]\nname=  a \n"));
    }
}
