use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "resume-analyser")]
#[command(about = "Match a resume against a job description", long_about = None)]
pub struct Cli {
    /// Resume file (PDF, DOC, DOCX or TXT, at most 5 MB)
    #[arg(short, long)]
    pub resume: PathBuf,

    /// Job description text
    #[arg(
        short,
        long,
        conflicts_with = "job_description_file",
        required_unless_present = "job_description_file"
    )]
    pub job_description: Option<String>,

    /// Read the job description from a file instead
    #[arg(long)]
    pub job_description_file: Option<PathBuf>,

    /// RON config file (default: ./analyser.ron)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the analysis service base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Write the results HTML here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Verbose logging on the terminal as well as the log file
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn job_description_sources_are_exclusive() {
        assert!(Cli::try_parse_from(["resume-analyser", "-r", "cv.pdf"]).is_err());
        assert!(Cli::try_parse_from([
            "resume-analyser",
            "-r",
            "cv.pdf",
            "-j",
            "text",
            "--job-description-file",
            "jd.txt",
        ])
        .is_err());

        let cli = Cli::try_parse_from([
            "resume-analyser",
            "--resume",
            "cv.pdf",
            "--job-description-file",
            "jd.txt",
        ])
        .unwrap();
        assert_eq!(cli.job_description_file, Some(PathBuf::from("jd.txt")));
        assert!(cli.job_description.is_none());
    }
}
