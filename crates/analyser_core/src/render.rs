//! Pure rendering of an [`AnalysisResult`] into HTML result sections.
use std::fmt::Write;

use crate::analysis::{AnalysisResult, EducationAnalysis, ExperienceAnalysis, SkillsAnalysis};
use crate::escape::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Score,
    Skills,
    Experience,
    Education,
    Recommendations,
    MissingKeywords,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSection {
    pub kind: SectionKind,
    /// Inner markup of the section element.
    pub html: String,
}

impl ResultSection {
    fn class_name(&self) -> &'static str {
        match self.kind {
            SectionKind::Score => "result-section score-card",
            _ => "result-section",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultsView {
    pub sections: Vec<ResultSection>,
}

impl ResultsView {
    pub fn kinds(&self) -> Vec<SectionKind> {
        self.sections.iter().map(|section| section.kind).collect()
    }

    pub fn section(&self, kind: SectionKind) -> Option<&ResultSection> {
        self.sections.iter().find(|section| section.kind == kind)
    }

    /// Full markup for the results container.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<div class=\"results-wrapper\">");
        for section in &self.sections {
            let _ = write!(
                out,
                "<div class=\"{}\">{}</div>",
                section.class_name(),
                section.html
            );
        }
        out.push_str("</div>");
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBucket {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBucket {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreBucket::Excellent
        } else if score >= 60.0 {
            ScoreBucket::Good
        } else if score >= 40.0 {
            ScoreBucket::Fair
        } else {
            ScoreBucket::Poor
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ScoreBucket::Excellent => "score-excellent",
            ScoreBucket::Good => "score-good",
            ScoreBucket::Fair => "score-fair",
            ScoreBucket::Poor => "score-poor",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ScoreBucket::Excellent => "Excellent match! Your resume is highly aligned with this job.",
            ScoreBucket::Good => "Good match. Your resume aligns well with the job requirements.",
            ScoreBucket::Fair => "Fair match. Consider improving your resume for better alignment.",
            ScoreBucket::Poor => {
                "Needs improvement. Review recommendations below to strengthen your resume."
            }
        }
    }
}

/// Rounds half-way values towards positive infinity (2.5 -> 3, -2.5 -> -2).
pub fn display_score(score: f64) -> i64 {
    let floor = score.floor();
    if score - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

pub fn render_results(result: &AnalysisResult) -> ResultsView {
    let mut sections = Vec::new();

    if let Some(score) = result.match_score {
        sections.push(ResultSection {
            kind: SectionKind::Score,
            html: score_card(score),
        });
    }
    if let Some(skills) = &result.skills_analysis {
        sections.push(ResultSection {
            kind: SectionKind::Skills,
            html: skills_section(skills),
        });
    }
    if let Some(experience) = &result.experience_analysis {
        sections.push(ResultSection {
            kind: SectionKind::Experience,
            html: experience_section(experience),
        });
    }
    if let Some(education) = &result.education_analysis {
        sections.push(ResultSection {
            kind: SectionKind::Education,
            html: education_section(education),
        });
    }
    if let Some(recommendations) = non_empty(&result.recommendations) {
        sections.push(ResultSection {
            kind: SectionKind::Recommendations,
            html: recommendations_section(recommendations),
        });
    }
    if let Some(keywords) = non_empty(&result.missing_keywords) {
        sections.push(ResultSection {
            kind: SectionKind::MissingKeywords,
            html: keywords_section(keywords),
        });
    }

    ResultsView { sections }
}

fn non_empty(items: &Option<Vec<String>>) -> Option<&[String]> {
    items.as_deref().filter(|items| !items.is_empty())
}

fn non_empty_str(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|text| !text.is_empty())
}

fn score_card(score: f64) -> String {
    let bucket = ScoreBucket::from_score(score);
    format!(
        "<h2>Match Score</h2>\
         <div class=\"score-circle {class}\"><span class=\"score-value\">{value}%</span></div>\
         <p class=\"score-description\">{description}</p>",
        class = bucket.css_class(),
        value = display_score(score),
        description = bucket.description(),
    )
}

fn skills_section(skills: &SkillsAnalysis) -> String {
    let mut html = String::from("<h3>Skills Analysis</h3>");
    if let Some(matched) = non_empty(&skills.matched_skills) {
        push_skill_category(&mut html, "Matched Skills", "skill-matched", matched);
    }
    if let Some(missing) = non_empty(&skills.missing_skills) {
        push_skill_category(&mut html, "Missing Skills", "skill-missing", missing);
    }
    html
}

fn push_skill_category(html: &mut String, title: &str, badge_class: &str, skills: &[String]) {
    let _ = write!(
        html,
        "<div class=\"skills-category\"><h4>{title}</h4><div class=\"skills-list\">"
    );
    for skill in skills {
        let _ = write!(
            html,
            "<span class=\"skill-badge {badge_class}\">{}</span>",
            escape_html(skill)
        );
    }
    html.push_str("</div></div>");
}

fn push_item(html: &mut String, label: &str, value: &str) {
    let _ = write!(
        html,
        "<div class=\"analysis-item\"><strong>{label}:</strong><span>{}</span></div>",
        escape_html(value)
    );
}

fn push_match_badge(html: &mut String, label: &str, is_match: bool) {
    let (class, text) = if is_match {
        ("badge-success", "Meets Requirements")
    } else {
        ("badge-warning", "Below Requirements")
    };
    let _ = write!(
        html,
        "<div class=\"analysis-item\"><strong>{label}:</strong><span class=\"badge {class}\">{text}</span></div>"
    );
}

fn push_feedback(html: &mut String, feedback: &str) {
    let _ = write!(html, "<p class=\"feedback\">{}</p>", escape_html(feedback));
}

fn experience_section(experience: &ExperienceAnalysis) -> String {
    let mut html = String::from("<h3>Experience Analysis</h3>");
    if let Some(years) = experience.years_required.as_ref().filter(|y| y.is_truthy()) {
        push_item(&mut html, "Years Required", &years.to_string());
    }
    if let Some(years) = experience.years_provided.as_ref().filter(|y| y.is_truthy()) {
        push_item(&mut html, "Years Provided", &years.to_string());
    }
    // Only a true match shows a badge here; education shows false as well.
    if experience.is_match == Some(true) {
        push_match_badge(&mut html, "Experience Match", true);
    }
    if let Some(feedback) = non_empty_str(&experience.feedback) {
        push_feedback(&mut html, feedback);
    }
    html
}

fn education_section(education: &EducationAnalysis) -> String {
    let mut html = String::from("<h3>Education Analysis</h3>");
    if let Some(required) = non_empty_str(&education.required) {
        push_item(&mut html, "Required Education", required);
    }
    if let Some(provided) = non_empty_str(&education.provided) {
        push_item(&mut html, "Your Education", provided);
    }
    if let Some(is_match) = education.is_match {
        push_match_badge(&mut html, "Education Match", is_match);
    }
    if let Some(feedback) = non_empty_str(&education.feedback) {
        push_feedback(&mut html, feedback);
    }
    html
}

fn recommendations_section(recommendations: &[String]) -> String {
    let mut html = String::from("<h3>Recommendations</h3><ul class=\"recommendations-list\">");
    for recommendation in recommendations {
        let _ = write!(html, "<li>{}</li>", escape_html(recommendation));
    }
    html.push_str("</ul>");
    html
}

fn keywords_section(keywords: &[String]) -> String {
    let mut html = String::from(
        "<h3>Keywords to Add</h3><p>Consider adding these keywords to your resume:</p><div class=\"keywords-list\">",
    );
    for keyword in keywords {
        let _ = write!(
            html,
            "<span class=\"keyword-badge\">{}</span>",
            escape_html(keyword)
        );
    }
    html.push_str("</div>");
    html
}
