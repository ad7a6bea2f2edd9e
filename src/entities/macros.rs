//! Macros for reducing boilerplate when defining entities
//!
//! These macros generate the repetitive trait implementations needed for
//! each record type: the `Entity` accessors and the declarative
//! validation rules.

/// Implement `Entity` for a struct with `id`, `created_at` and `updated_at`
/// fields, backed by a static `EntitySchema`.
///
/// # Example
/// ```rust,ignore
/// static WIDGET_SCHEMA: EntitySchema = EntitySchema { /* ... */ };
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Widget {
///     pub id: Uuid,
///     pub label: String,
///     pub created_at: DateTime<Utc>,
///     pub updated_at: DateTime<Utc>,
/// }
///
/// impl_entity!(Widget, WIDGET_SCHEMA);
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ident, $schema:path) => {
        impl $crate::core::entity::Entity for $type {
            fn schema() -> &'static $crate::core::field::EntitySchema {
                &$schema
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }
        }
    };
}

/// Declare the validation rules and filters of an entity.
///
/// Fields are validated in the order they are listed under `validate`.
/// Filters run on a field before its validators. For `Submission::Update`
/// the same rules apply, but only to fields present in the payload.
///
/// # Example
///
/// ```rust,ignore
/// impl_validated_entity!(
///     Influencer,
///     "influencer",
///     validate: {
///         name: [required string],
///         followers: [required number integer non_negative],
///     },
///     filters: {
///         followers: [integral],
///     }
/// );
/// ```
#[macro_export]
macro_rules! impl_validated_entity {
    (
        $type:ident,
        $type_name:expr,
        validate: {
            $(
                $val_field:ident: [ $( $validator:tt )* ]
            ),* $(,)?
        }
        $(
            ,
            filters: {
                $(
                    $fil_field:ident: [ $( $filter:tt )* ]
                ),* $(,)?
            }
        )?
        $(,)?
    ) => {
        impl $crate::core::validation::ValidatableEntity for $type {
            fn validation_config(
                submission: $crate::core::validation::Submission,
            ) -> $crate::core::validation::EntityValidationConfig {
                let mut config = $crate::core::validation::EntityValidationConfig::new($type_name);

                // Validators first so the declaration order drives evaluation
                $(
                    $crate::add_validators_for_field!(config, stringify!($val_field), $( $validator )*);
                )*

                $(
                    $(
                        $crate::add_filters_for_field!(config, stringify!($fil_field), $( $filter )*);
                    )*
                )?

                match submission {
                    $crate::core::validation::Submission::Create => config,
                    $crate::core::validation::Submission::Update => config.partial(),
                }
            }
        }
    };
}

/// Helper macro to add validators to a field
#[macro_export]
macro_rules! add_validators_for_field {
    // Base case: empty
    ($config:expr, $field:expr,) => {};

    // required
    ($config:expr, $field:expr, required $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::required());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // string
    ($config:expr, $field:expr, string $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::string());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // number
    ($config:expr, $field:expr, number $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::number());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // integer
    ($config:expr, $field:expr, integer $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::integer());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // non_negative
    ($config:expr, $field:expr, non_negative $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::non_negative());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // email
    ($config:expr, $field:expr, email $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::email());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // uuid
    ($config:expr, $field:expr, uuid $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::uuid());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };
}

/// Helper macro to add filters to a field
#[macro_export]
macro_rules! add_filters_for_field {
    // Base case: empty
    ($config:expr, $field:expr,) => {};

    // integral
    ($config:expr, $field:expr, integral $( $rest:tt )*) => {
        $config.add_filter($field, $crate::core::validation::filters::integral());
        $crate::add_filters_for_field!($config, $field, $( $rest )*);
    };
}
