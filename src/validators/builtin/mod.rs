//! Built-in validators

mod compare;
mod credit_card;
mod custom;
mod format;
mod group;
mod length;
mod presence;

pub use compare::{DifferentValidator, EqualToValidator};
pub use credit_card::CreditCardValidator;
pub use custom::{CallbackValidator, PatternValidator, RemoteValidator};
pub use format::{EmailValidator, NumberValidator};
pub use group::{
    MaxCheckedValidator, MaxSelectedValidator, MinCheckedValidator, MinSelectedValidator,
};
pub use length::{MaxLengthValidator, MinLengthValidator};
pub use presence::RequiredValidator;

#[cfg(test)]
pub(crate) mod testutil {
    use crate::config::{FormOptions, ScopedOptions};
    use crate::field::{Field, FieldValue, FormSnapshot};
    use crate::messages::MessageCatalog;
    use crate::validators::registry::CustomValidators;
    use crate::validators::RuleContext;

    /// Owns everything a [`RuleContext`] borrows
    pub struct Harness {
        pub field: Field,
        pub value: FieldValue,
        pub form: FormSnapshot,
        pub options: ScopedOptions,
        pub custom: CustomValidators,
        pub messages: MessageCatalog,
        pub argument: Option<String>,
    }

    impl Harness {
        pub fn new(field: Field) -> Self {
            let form = FormSnapshot::new(vec![field.clone()]);
            Self::with_form(field, form)
        }

        pub fn with_form(field: Field, form: FormSnapshot) -> Self {
            let options = FormOptions::default().scoped(&field);
            let value = field.value.trimmed();
            Self {
                field,
                value,
                form,
                options,
                custom: CustomValidators::default(),
                messages: MessageCatalog::default(),
                argument: None,
            }
        }

        pub fn arg(mut self, argument: &str) -> Self {
            self.argument = Some(argument.to_string());
            self
        }

        pub fn ctx(&self) -> RuleContext<'_> {
            RuleContext {
                field: &self.field,
                value: &self.value,
                argument: self.argument.as_deref(),
                form: &self.form,
                options: &self.options,
                custom: &self.custom,
                messages: &self.messages,
            }
        }
    }
}
