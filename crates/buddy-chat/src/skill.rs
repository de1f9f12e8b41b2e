//! Text rendering of skill-analysis reports.

use buddy_core::{SkillAnalysisReport, SkillLevel};

/// Render a skill report as one multi-section chat message.
///
/// Returns `None` when the report carries no `analysis` section.
pub fn format_skill_report(report: &SkillAnalysisReport) -> Option<String> {
    let analysis = report.analysis.as_ref()?;

    let mut lines = vec![format!("⚠️ Level kelemahan: {}", analysis.weakness_level)];

    if !analysis.findings.is_empty() {
        lines.push("\n📊 Temuan:".to_string());
        lines.extend(analysis.findings.iter().map(|f| format!("- {}", f)));
    }

    if !analysis.suggestions.is_empty() {
        lines.push("\n💡 Saran:".to_string());
        lines.extend(analysis.suggestions.iter().map(|s| format!("- {}", s)));
    }

    if let Some(dev) = report
        .skill_development
        .as_ref()
        .filter(|d| !d.top_skills.is_empty())
    {
        lines.push("\n🎯 Skill yang Paling Berkembang:".to_string());
        if let Some(ref most) = dev.most_developed {
            lines.push(skill_line(most));
        }

        lines.push("\n📈 Top 5 Skills:".to_string());
        for (idx, skill) in dev.top_skills.iter().enumerate() {
            lines.push(format!("{}. {}", idx + 1, skill_line(skill)));
        }
    }

    Some(lines.join("\n"))
}

fn skill_line(level: &SkillLevel) -> String {
    format!(
        "{}: {} ({}%)",
        level.skill, level.proficiency_label, level.proficiency
    )
}
