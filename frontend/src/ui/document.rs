//! Read/write access to the new bill form, independent of how it is rendered.

/// Inputs of the new bill form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    ExpenseType,
    ExpenseName,
    Amount,
    Date,
    Vat,
    Pct,
    Commentary,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::ExpenseType,
        FormField::ExpenseName,
        FormField::Amount,
        FormField::Date,
        FormField::Vat,
        FormField::Pct,
        FormField::Commentary,
    ];

    /// `data-testid` attribute of the input in the rendered form
    pub fn test_id(&self) -> &'static str {
        match self {
            FormField::ExpenseType => "expense-type",
            FormField::ExpenseName => "expense-name",
            FormField::Amount => "amount",
            FormField::Date => "datepicker",
            FormField::Vat => "vat",
            FormField::Pct => "pct",
            FormField::Commentary => "commentary",
        }
    }
}

/// A file picked in the receipt input
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    /// Name as reported by the input, possibly prefixed by a fake path
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Last path segment of the name (`C:\fakepath\receipt.jpg` -> `receipt.jpg`)
    pub fn file_name(&self) -> &str {
        self.name
            .rsplit(['\\', '/'])
            .next()
            .unwrap_or(self.name.as_str())
    }
}

/// The rendered new bill form
pub trait NewBillDocument {
    /// Current value of a form input, empty when untouched
    fn field_value(&self, field: FormField) -> String;

    /// File currently selected in the receipt input
    fn selected_file(&self) -> Option<SelectedFile>;

    /// Reset the receipt input so no file is selected
    fn clear_file_input(&self);
}

/// Modal surfaces the controllers can open
pub trait Dialogs {
    /// Blocking user-facing message
    fn alert(&self, message: &str);

    /// Show the receipt image stored at `url`, titled with its file name
    fn show_receipt(&self, url: &str, file_name: &str);
}
