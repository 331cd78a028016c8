/// Script flavour a scanner recognizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dialect {
    #[default]
    Plain,
    /// Markup elements inside expressions.
    Jsx,
    /// [`Dialect::Jsx`] plus type syntax and generic argument lists.
    Tsx,
}

impl Dialect {
    pub fn has_markup(self) -> bool {
        matches!(self, Dialect::Jsx | Dialect::Tsx)
    }

    pub fn has_types(self) -> bool {
        self == Dialect::Tsx
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JsConfig {
    pub dialect: Dialect,
}

impl JsConfig {
    pub fn with_dialect(dialect: Dialect) -> Self {
        Self { dialect }
    }
}
