/// A signup submission after defaulting. The fields are deliberately plain,
/// unvalidated strings: whatever the form carries is forwarded as-is, and a
/// missing field becomes the empty string.
#[derive(Debug, Clone)]
pub struct Signup {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}
