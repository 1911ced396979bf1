/// Login screen shown: load a fresh challenge.
pub struct LoginMountReq;

impl LoginMountReq {
    pub const PATH: &'static str = "auth/mount";
}

/// Login form submitted.
pub struct LoginReq {
    pub email: String,
    pub password: String,
    /// What the user typed for the challenge.
    pub captcha: String,
}

impl LoginReq {
    pub const PATH: &'static str = "auth/submit";
}

/// Clear the session and go back to the login screen.
pub struct LogoutReq;

impl LogoutReq {
    pub const PATH: &'static str = "auth/logout";
}
