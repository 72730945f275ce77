use derive_more::Display;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    pub theme: Theme,
}

#[derive(Debug, Clone, Copy, Default, Display, PartialEq, Eq)]
pub enum Theme {
    #[display("System")]
    System,
    #[default]
    #[display("Light")]
    Light,
    #[display("Dark")]
    Dark,
}
