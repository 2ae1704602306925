use std::fmt;
use std::sync::Arc;

/// Resume MIME types the backend accepts.
pub const ACCEPTED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
];

/// 5 MiB.
pub const MAX_RESUME_BYTES: u64 = 5 * 1024 * 1024;

pub const MIN_JOB_DESCRIPTION_CHARS: usize = 10;
pub const MAX_JOB_DESCRIPTION_CHARS: usize = 5000;

/// A file the user picked for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub content: Arc<[u8]>,
}

impl SelectedFile {
    /// Build a selection whose size is the content length.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        let content: Arc<[u8]> = content.into();
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size: content.len() as u64,
            content,
        }
    }
}

// Content is left out: it can be megabytes.
impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRejection {
    UnsupportedType,
    TooLarge,
}

impl FileRejection {
    pub fn message(self) -> &'static str {
        match self {
            FileRejection::UnsupportedType => {
                "Invalid file type. Please upload a PDF, DOC, DOCX, or TXT file."
            }
            FileRejection::TooLarge => "File size exceeds 5MB limit. Please upload a smaller file.",
        }
    }
}

/// Selection-time check. Type is checked before size.
pub fn check_resume_file(file: &SelectedFile) -> Result<(), FileRejection> {
    if !ACCEPTED_MIME_TYPES.contains(&file.mime_type.as_str()) {
        return Err(FileRejection::UnsupportedType);
    }
    if file.size > MAX_RESUME_BYTES {
        return Err(FileRejection::TooLarge);
    }
    Ok(())
}

/// Submit-time verdict over both inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    MissingResume,
    EmptyJobDescription,
    JobDescriptionTooShort,
    JobDescriptionTooLong,
}

impl InputError {
    pub fn message(self) -> &'static str {
        match self {
            InputError::MissingResume => "Please upload a resume file.",
            InputError::EmptyJobDescription => "Please enter a job description.",
            InputError::JobDescriptionTooShort => {
                "Job description must be at least 10 characters long."
            }
            InputError::JobDescriptionTooLong => "Job description must not exceed 5000 characters.",
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Rules run in order and the first failure wins.
pub fn validate_form_inputs(
    resume: Option<&SelectedFile>,
    job_description: &str,
) -> Result<(), InputError> {
    if resume.is_none() {
        return Err(InputError::MissingResume);
    }
    let trimmed = job_description.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyJobDescription);
    }
    let len = trimmed.chars().count();
    if len < MIN_JOB_DESCRIPTION_CHARS {
        return Err(InputError::JobDescriptionTooShort);
    }
    if len > MAX_JOB_DESCRIPTION_CHARS {
        return Err(InputError::JobDescriptionTooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(mime: &str, size: u64) -> SelectedFile {
        SelectedFile {
            name: "cv.pdf".to_string(),
            mime_type: mime.to_string(),
            size,
            content: Arc::from(Vec::new()),
        }
    }

    #[test]
    fn accepts_every_listed_type_at_the_size_limit() {
        for mime in ACCEPTED_MIME_TYPES {
            assert_eq!(check_resume_file(&file(mime, MAX_RESUME_BYTES)), Ok(()));
        }
    }

    #[test]
    fn rejects_unknown_type_before_size() {
        assert_eq!(
            check_resume_file(&file("image/png", MAX_RESUME_BYTES + 1)),
            Err(FileRejection::UnsupportedType)
        );
        assert_eq!(
            check_resume_file(&file("application/pdf", MAX_RESUME_BYTES + 1)),
            Err(FileRejection::TooLarge)
        );
    }

    #[test]
    fn missing_resume_wins_over_text_problems() {
        assert_eq!(
            validate_form_inputs(None, ""),
            Err(InputError::MissingResume)
        );
    }

    #[test]
    fn job_description_length_is_measured_after_trimming() {
        let resume = file("text/plain", 1);
        let resume = Some(&resume);
        assert_eq!(
            validate_form_inputs(resume, "   \n\t "),
            Err(InputError::EmptyJobDescription)
        );
        assert_eq!(
            validate_form_inputs(resume, "   123456789   "),
            Err(InputError::JobDescriptionTooShort)
        );
        assert_eq!(validate_form_inputs(resume, "  1234567890  "), Ok(()));
        assert_eq!(validate_form_inputs(resume, &"x".repeat(5000)), Ok(()));
        assert_eq!(
            validate_form_inputs(resume, &"x".repeat(5001)),
            Err(InputError::JobDescriptionTooLong)
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let resume = file("text/plain", 1);
        // Ten two-byte characters.
        assert_eq!(validate_form_inputs(Some(&resume), &"é".repeat(10)), Ok(()));
    }
}
