//! Recommendation surface: the list shown after a recommendation request.

use buddy_core::Recommendation;

/// Holds the last fetched recommendations and whether they are on screen.
#[derive(Debug, Clone, Default)]
pub struct RecommendationSurface {
    items: Vec<Recommendation>,
    open: bool,
}

impl RecommendationSurface {
    /// Replace the list and show it.
    pub fn show(&mut self, items: Vec<Recommendation>) {
        self.items = items;
        self.open = true;
    }

    /// Hide the surface and discard its list.
    pub fn close(&mut self) {
        self.items.clear();
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn items(&self) -> &[Recommendation] {
        &self.items
    }

    /// Render the surface as plain text, or `None` when it is closed.
    ///
    /// `user` is the display name shown in the title; empty falls back to
    /// "Anda".
    pub fn render(&self, user: &str) -> Option<String> {
        if !self.open {
            return None;
        }

        let who = if user.is_empty() { "Anda" } else { user };
        let mut out = vec![
            format!("Rekomendasi Kursus untuk {}", who),
            "Berdasarkan progres terakhir, ini kursus yang direkomendasikan.".to_string(),
        ];

        if self.items.is_empty() {
            out.push(String::new());
            out.push("Tidak ada rekomendasi saat ini.".to_string());
        }

        for rec in &self.items {
            out.push(String::new());
            out.push(rec.course_name.clone());
            out.push(format!(
                "Level: {} • Durasi: {} jam",
                rec.course_level_str, rec.hours_to_study
            ));
            if let Some(reason) = rec.reason.as_deref().filter(|r| !r.is_empty()) {
                out.push(format!("Alasan: {}", reason));
            }
            if let Some(score) = rec.score {
                out.push(format!("Relevansi: {}%", (score * 100.0).round()));
            }
        }

        Some(out.join("\n"))
    }
}
