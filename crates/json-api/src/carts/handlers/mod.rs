pub(crate) mod add_item;
pub(crate) mod get;
pub(crate) mod remove_item;
