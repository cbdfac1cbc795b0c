//! The single-page encryption form
//!
//! Rendering, submission validation and download-name handling. Nothing in
//! here touches the file system.

use axum::body::Bytes;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Suggested download name when the user leaves the field empty
pub const DEFAULT_OUTPUT_NAME: &str = "protected.pdf";

pub const MSG_NO_FILE: &str = "Please upload a PDF file first.";
pub const MSG_NO_PASSWORD: &str = "Please enter a password.";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match. Please try again.";

/// Raw form fields of one submission
#[derive(Debug, Clone, Default)]
pub struct FormSubmission {
    /// Contents of the `file` field, if the browser sent one
    pub upload: Option<Bytes>,
    pub password: String,
    pub confirm_password: String,
    pub output_name: String,
}

/// A submission that passed validation and may be encrypted
#[derive(Debug, Clone)]
pub struct ValidSubmission {
    pub bytes: Bytes,
    pub password: String,
    pub download_name: String,
}

impl FormSubmission {
    /// Check the submission in the order the form presents its fields.
    pub fn validate(self) -> Result<ValidSubmission, &'static str> {
        let bytes = match self.upload {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => return Err(MSG_NO_FILE),
        };
        if self.password.is_empty() {
            return Err(MSG_NO_PASSWORD);
        }
        if self.password != self.confirm_password {
            return Err(MSG_PASSWORD_MISMATCH);
        }

        Ok(ValidSubmission {
            bytes,
            password: self.password,
            download_name: download_name(&self.output_name),
        })
    }
}

/// Normalise a user-supplied output name into a safe download file name.
///
/// Keeps the last path component, drops anything that is not printable
/// ASCII or would break the quoted `Content-Disposition` value, and
/// appends `.pdf` unless the name already ends with it.
pub fn download_name(requested: &str) -> String {
    let base = requested.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .trim()
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .filter(|c| *c != '"')
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return DEFAULT_OUTPUT_NAME.to_string();
    }

    let mut name = cleaned.to_string();
    if !name.to_ascii_lowercase().ends_with(".pdf") {
        name.push_str(".pdf");
    }
    name
}

/// What the page should show
#[derive(Debug, Clone, Copy)]
pub struct FormView<'a> {
    pub error: Option<&'a str>,
    pub output_name: &'a str,
}

impl Default for FormView<'_> {
    fn default() -> Self {
        Self {
            error: None,
            output_name: DEFAULT_OUTPUT_NAME,
        }
    }
}

/// Render the complete HTML page
pub fn render_page(view: &FormView<'_>) -> String {
    let banner = match view.error {
        Some(message) => format!(
            r#"<div class="banner error" role="alert">{}</div>"#,
            encode_text(message)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>passifypdf &mdash; PDF Password Protector</title>
<style>
body {{ font-family: system-ui, sans-serif; max-width: 40rem; margin: 2rem auto; padding: 0 1rem; }}
label {{ display: block; margin-top: 1rem; font-weight: 600; }}
input {{ width: 100%; padding: 0.4rem; box-sizing: border-box; }}
.passwords {{ display: flex; gap: 1rem; }}
.passwords > div {{ flex: 1; }}
button {{ margin-top: 1.5rem; width: 100%; padding: 0.6rem; font-size: 1rem; }}
.banner {{ margin: 1rem 0; padding: 0.75rem; border-radius: 4px; }}
.error {{ background: #fde8e8; color: #9b1c1c; }}
footer {{ margin-top: 2rem; color: #666; font-size: 0.85rem; }}
</style>
</head>
<body>
<h1>passifypdf</h1>
<p>Protect your PDF files with a password &mdash; right in the browser.</p>
{banner}
<form method="post" action="/encrypt" enctype="multipart/form-data">
<label for="file">Upload a PDF file</label>
<input id="file" name="file" type="file" accept=".pdf,application/pdf">
<div class="passwords">
<div>
<label for="password">Password</label>
<input id="password" name="password" type="password" placeholder="Enter a strong password">
</div>
<div>
<label for="confirm_password">Confirm password</label>
<input id="confirm_password" name="confirm_password" type="password" placeholder="Re-enter the password">
</div>
</div>
<label for="output_name">Output filename</label>
<input id="output_name" name="output_name" type="text" value="{output_name}">
<button type="submit">Encrypt PDF</button>
</form>
<footer>passifypdf &mdash; open source PDF encryption tool.</footer>
</body>
</html>
"#,
        banner = banner,
        output_name = encode_double_quoted_attribute(view.output_name),
    )
}
