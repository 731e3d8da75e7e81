pub(crate) mod charge;
pub(crate) mod redirect_capture;
pub(crate) mod redirect_create;
