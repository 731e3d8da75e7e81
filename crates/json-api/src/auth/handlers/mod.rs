pub(crate) mod signin;
pub(crate) mod signup;
