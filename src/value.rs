//! Conversions from metadata types into [`gtmpl_value::Value`]s for
//! templating. Nullable fields become [`Value::Nil`] so templates can
//! distinguish "no expiry" from an empty string.

use std::collections::HashMap;

use gtmpl_value::Value;
use url::Url;

use crate::collection::Entry;
use crate::document::{Article, Certification, Experience, Level, Project};

fn strings(items: &[String]) -> Value {
    Value::Array(items.iter().map(|s| Value::from(s.as_str())).collect())
}

fn optional(value: &Option<String>) -> Value {
    match value {
        Some(s) => Value::from(s.as_str()),
        None => Value::Nil,
    }
}

impl<M> Entry<M>
where
    for<'v> &'v M: Into<Value>,
{
    /// Converts the entry's metadata into a template value with the slug
    /// and page URL merged in.
    pub fn to_value(&self, url: &Url) -> Value {
        let mut value: Value = (&self.meta).into();
        if let Value::Object(m) = &mut value {
            m.insert("slug".to_owned(), Value::from(self.slug.as_str()));
            m.insert("url".to_owned(), Value::String(url.to_string()));
        }
        value
    }
}

impl From<&Article> for Value {
    fn from(a: &Article) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("title".to_owned(), Value::from(a.title.as_str()));
        m.insert(
            "description".to_owned(),
            Value::from(a.description.as_str()),
        );
        m.insert("date".to_owned(), Value::from(a.date.as_str()));
        m.insert("read_time".to_owned(), Value::from(a.read_time.as_str()));
        m.insert("tags".to_owned(), strings(&a.tags));
        m.insert(
            "cover_image".to_owned(),
            Value::from(a.cover_image.as_str()),
        );
        Value::Object(m)
    }
}

impl From<&Project> for Value {
    fn from(p: &Project) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("title".to_owned(), Value::from(p.title.as_str()));
        m.insert("date".to_owned(), Value::from(p.date.as_str()));
        m.insert(
            "description".to_owned(),
            Value::from(p.description.as_str()),
        );
        m.insert("tags".to_owned(), strings(&p.tags));
        m.insert("read_time".to_owned(), Value::from(p.read_time.as_str()));
        m.insert("image".to_owned(), Value::from(p.image.as_str()));
        Value::Object(m)
    }
}

impl From<&Certification> for Value {
    fn from(c: &Certification) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("title".to_owned(), Value::from(c.title.as_str()));
        m.insert("date".to_owned(), Value::from(c.date.as_str()));
        m.insert("provider".to_owned(), Value::from(c.provider.as_str()));
        m.insert(
            "description".to_owned(),
            Value::from(c.description.as_str()),
        );
        m.insert(
            "credential_id".to_owned(),
            Value::from(c.credential_id.as_str()),
        );
        m.insert("expiry_date".to_owned(), optional(&c.expiry_date));
        m.insert(
            "verification_url".to_owned(),
            optional(&c.verification_url),
        );
        m.insert("skills".to_owned(), strings(&c.skills));
        m.insert(
            "level".to_owned(),
            match c.level {
                Some(level) => Value::from(level.as_str()),
                None => Value::Nil,
            },
        );
        m.insert("logo".to_owned(), Value::from(c.logo.as_str()));
        Value::Object(m)
    }
}

impl From<&Experience> for Value {
    fn from(e: &Experience) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("title".to_owned(), Value::from(e.title.as_str()));
        m.insert(
            "organization".to_owned(),
            Value::from(e.organization.as_str()),
        );
        m.insert("role".to_owned(), Value::from(e.role.as_str()));
        m.insert("period".to_owned(), Value::from(e.period.as_str()));
        m.insert(
            "description".to_owned(),
            Value::from(e.description.as_str()),
        );
        m.insert("image".to_owned(), Value::from(e.image.as_str()));
        m.insert("logo".to_owned(), Value::from(e.logo.as_str()));
        m.insert("tags".to_owned(), strings(&e.tags));
        Value::Object(m)
    }
}

impl From<Level> for Value {
    fn from(level: Level) -> Value {
        Value::from(level.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_nullable_fields_convert_to_nil() {
        let cert = Certification::default();
        let value: Value = (&cert).into();
        match value {
            Value::Object(m) => {
                assert_eq!(m["expiry_date"], Value::Nil);
                assert_eq!(m["verification_url"], Value::Nil);
                assert_eq!(m["level"], Value::Nil);
                assert_eq!(m["credential_id"], Value::from(""));
            }
            other => panic!("expected an object, got {:?}", other),
        }
    }
}
