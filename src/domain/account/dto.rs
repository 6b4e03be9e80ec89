#[derive(Debug, Clone)]
pub struct CreateAccountDto {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_staff: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateProfileDto {
    pub username: String,
    pub email: String,
}
