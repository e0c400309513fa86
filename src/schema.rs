#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSchema {
    Boolean,
    Number,
    Time,
    Text,
    Array,
    Object,
    Quantity,
    Undefined,
}

impl DataSchema {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Time => "time",
            Self::Text => "text",
            Self::Array => "array",
            Self::Object => "object",
            Self::Quantity => "quantity",
            Self::Undefined => "undefined",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiSchema {
    Boolean,
    Number,
    NumberWithPrefix,
    Time,
    Text,
    Array,
    ArrayOfEnumeration,
    ArrayOfObject,
    Object,
    ObjectOfKeyValue,
    Link,
    Ratio,
    Undefined,
}

impl UiSchema {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::NumberWithPrefix => "number-with-prefix",
            Self::Time => "time",
            Self::Text => "text",
            Self::Array => "array",
            Self::ArrayOfEnumeration => "array-of-enumeration",
            Self::ArrayOfObject => "array-of-object",
            Self::Object => "object",
            Self::ObjectOfKeyValue => "object-of-key-value",
            Self::Link => "link",
            Self::Ratio => "ratio",
            Self::Undefined => "undefined",
        }
    }
}

fn is_time_format(format: Option<&str>) -> bool {
    matches!(format, Some("date") | Some("date-time"))
}

// Fallback classification for kinds without a declared schema. Unrecognized
// input means "no special handling", not an error.
pub fn default_data_schema(type_name: Option<&str>, format: Option<&str>) -> DataSchema {
    match type_name {
        Some("boolean") => DataSchema::Boolean,
        Some("number") | Some("integer") => DataSchema::Number,
        Some("string") if is_time_format(format) => DataSchema::Time,
        Some("string") => DataSchema::Text,
        Some("array") => DataSchema::Array,
        Some("object") => DataSchema::Object,
        _ => DataSchema::Undefined,
    }
}

pub fn default_ui_schema(type_name: Option<&str>, format: Option<&str>) -> UiSchema {
    match type_name {
        Some("boolean") => UiSchema::Boolean,
        Some("number") | Some("integer") => UiSchema::Number,
        Some("string") if is_time_format(format) => UiSchema::Time,
        Some("string") => UiSchema::Text,
        Some("array") => UiSchema::Array,
        Some("object") => UiSchema::Object,
        _ => UiSchema::Undefined,
    }
}
