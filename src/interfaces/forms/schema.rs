use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Single select; an empty value counts as "not chosen".
    Choice { choices: Vec<Choice> },
    MultiChoice { choices: Vec<Choice> },
    Boolean,
    /// Bounded whole number, `0..=max`.
    Quantity { max: u32 },
    /// Decimal amount, at most two decimal places and six digits in total.
    Money { prefix: String },
    Text { max_length: Option<usize> },
    TextArea,
    /// Tokenized card input. The value is consumed by the gateway's browser
    /// library and never posted to the application server.
    GatewayText { gateway_field: String },
    GatewaySelect {
        gateway_field: String,
        choices: Vec<Choice>,
    },
}

impl FieldKind {
    /// Gateway fields are rendered but never read from a submission.
    pub fn is_gateway(&self) -> bool {
        matches!(
            self,
            Self::GatewayText { .. } | Self::GatewaySelect { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial: Option<String>,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            help_text: None,
            required: false,
            initial: None,
            kind,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.help_text = Some(text);
        }
        self
    }

    pub fn initial(mut self, value: impl Into<String>) -> Self {
        self.initial = Some(value.into());
        self
    }
}

/// An ordered set of fields synthesized for one section of the registration
/// or proposal flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSchema {
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn push(&mut self, field: FieldSpec) {
        self.fields.push(field);
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
