use tracing::{debug, trace};

use crate::field::FieldDescriptor;
use crate::source::EnvSource;

/// Picks the string a field should be bound from.
///
/// Returns the variable's value when it is set and non-empty, otherwise the
/// field's default. An empty result means there is nothing to bind. Fields
/// without a variable name always resolve to the empty string.
pub fn resolve<S>(field: &FieldDescriptor<'_>, source: &S) -> String
where
    S: EnvSource + ?Sized,
{
    let Some(var) = field.var else {
        return String::new();
    };

    match source.lookup(var) {
        Some(value) if !value.is_empty() => {
            trace!(field = field.name, var, "Resolved from environment");
            value
        }
        _ => {
            if !field.default.is_empty() {
                debug!(
                    field = field.name,
                    var,
                    default = field.default,
                    "Variable not set, falling back to default"
                );
            }
            field.default.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::field::{EnvField, FieldSlot};
    use crate::source::{MapEnv, MockEnvSource};

    #[test]
    fn test_value_from_environment() {
        let mut port = 0i32;
        let field = FieldDescriptor::new("port", port.slot()).var("PORT");
        let env = MapEnv::new().with("PORT", "3000");
        assert_eq!(resolve(&field, &env), "3000");
    }

    #[test]
    fn test_environment_wins_over_default() {
        let mut url = String::new();
        let field = FieldDescriptor::new("db_url", url.slot())
            .var("DBURL")
            .default_value("postgres://localhost:5432/mbp");
        let env = MapEnv::new().with("DBURL", "postgres://db:5432/prod");
        assert_eq!(resolve(&field, &env), "postgres://db:5432/prod");
    }

    #[test]
    fn test_unset_and_empty_fall_back_to_default() {
        let mut url = String::new();
        let field = FieldDescriptor::new("db_url", url.slot())
            .var("DBURL")
            .default_value("postgres://localhost:5432/mbp");

        assert_eq!(
            resolve(&field, &MapEnv::new()),
            "postgres://localhost:5432/mbp"
        );
        assert_eq!(
            resolve(&field, &MapEnv::new().with("DBURL", "")),
            "postgres://localhost:5432/mbp"
        );
    }

    #[test]
    fn test_unset_without_default_is_empty() {
        let mut flag = false;
        let field = FieldDescriptor::new("flag", flag.slot()).var("BOOL");
        assert_eq!(resolve(&field, &MapEnv::new()), "");
    }

    #[test]
    fn test_inert_field_never_looks_up() {
        let mut source = MockEnvSource::new();
        source.expect_lookup().never();

        let field = FieldDescriptor::new("label", FieldSlot::Inert).default_value("ignored");
        assert_eq!(resolve(&field, &source), "");
    }

    #[test]
    fn test_lookup_uses_exact_name() {
        let mut source = MockEnvSource::new();
        source
            .expect_lookup()
            .with(eq("FooStr"))
            .times(1)
            .returning(|_| Some("FOO".to_string()));

        let mut value = String::new();
        let field = FieldDescriptor::new("foo_str", value.slot()).var("FooStr");
        assert_eq!(resolve(&field, &source), "FOO");
    }
}
