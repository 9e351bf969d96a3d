//! Static project list and the overlay card markup built from it.

use std::fmt::Write;

#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    pub title: String,
    pub description: String,
    /// Icon font classes, e.g. `fas fa-palette`.
    pub icon: String,
    pub tags: Vec<String>,
    pub link: Option<String>,
    pub source: Option<String>,
    pub private: bool,
    pub university: bool,
}

impl Project {
    fn entry(
        title: &str,
        description: &str,
        icon: &str,
        tags: &[&str],
        link: Option<&str>,
        source: Option<&str>,
    ) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            link: link.map(str::to_string),
            source: source.map(str::to_string),
            private: false,
            university: false,
        }
    }

    fn private(mut self) -> Self {
        self.private = true;
        self
    }

    fn university(mut self) -> Self {
        self.university = true;
        self
    }
}

/// The projects shown on the sphere, in indicator order.
pub fn portfolio_projects() -> Vec<Project> {
    vec![
        Project::entry(
            "Email SaaS Platform",
            "SaaS platform for purchasing, managing, and health-tracking email accounts at scale.",
            "fas fa-envelope-open-text",
            &["FastAPI", "React", "PostgreSQL"],
            None,
            None,
        )
        .private(),
        Project::entry(
            "CycleGAN Monet",
            "Implemented CycleGAN from scratch for Kaggle competition with ResNet generators.",
            "fas fa-palette",
            &["PyTorch", "Python", "WandB"],
            Some("https://www.kaggle.com/competitions/gan-getting-started"),
            Some("https://github.com/5w7Tch/monet-cyclegan"),
        ),
        Project::entry(
            "Lead Generation System",
            "Full-stack system for lead filtering and email enrichment. Saved thousands for the company.",
            "fas fa-search-dollar",
            &["FastAPI", "React", "SQLAlchemy"],
            None,
            None,
        )
        .private(),
        Project::entry(
            "Quiz Social Platform",
            "Social network for quizzes with 10+ question types and competitive leaderboards.",
            "fas fa-question-circle",
            &["Java", "JSP", "MySQL"],
            None,
            Some("https://github.com/5w7Tch/PowerRangers"),
        ),
        Project::entry(
            "iOS Weather App",
            "Weather app with automatic location detection and manual city search.",
            "fas fa-cloud-sun",
            &["Swift", "UIKit", "CoreLocation"],
            None,
            Some("https://github.com/5w7Tch/IOS_Weather_APP"),
        ),
        Project::entry(
            "Interactive Book Portfolio",
            "Portfolio with realistic page-flip animations and optimized PDF loading.",
            "fas fa-book-open",
            &["JavaScript", "PDF.js", "Canvas"],
            Some("https://salomeshengelaia.site/"),
            Some("https://github.com/5w7Tch/Salome-Shengelaia-portfolio"),
        ),
        Project::entry(
            "NAND to Tetris HDL",
            "Built entire computing system from NAND gates up with HDL parser.",
            "fas fa-microchip",
            &["HDL", "Assembly", "Python"],
            None,
            Some("https://github.com/5w7Tch/HLD_nand_final"),
        ),
        Project::entry(
            "RISC-V Interpreter",
            "CPU interpreter simulating processor-register interactions.",
            "fas fa-terminal",
            &["Python", "RISC-V", "Assembly"],
            None,
            None,
        )
        .university(),
        Project::entry(
            "RISC-V OS Development",
            "Operating system syscalls with Copy-on-Write optimization.",
            "fas fa-cogs",
            &["C", "RISC-V", "OS Design"],
            None,
            None,
        )
        .university(),
        Project::entry(
            "Market API Backend",
            "Backend for cashiers with sales management and currency converter.",
            "fas fa-cash-register",
            &["Java", "Spring", "REST API"],
            None,
            Some("https://github.com/5w7Tch/Market-API"),
        ),
        Project::entry(
            "Email Tagging System",
            "System to organize email fleets with parallel tagging. Hours to seconds.",
            "fas fa-tags",
            &["FastAPI", "React", "PostgreSQL"],
            None,
            None,
        )
        .private(),
    ]
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Inner markup of one overlay card.
pub fn card_html(project: &Project) -> String {
    let mut links = String::new();
    if let Some(link) = &project.link {
        _ = write!(
            links,
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\" title=\"Live Demo\"><i class=\"fas fa-external-link-alt\"></i></a>",
            escape_html(link)
        );
    }
    if let Some(source) = &project.source {
        _ = write!(
            links,
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\" title=\"GitHub\"><i class=\"fab fa-github\"></i></a>",
            escape_html(source)
        );
    }
    if project.private {
        links.push_str("<span title=\"Private\"><i class=\"fas fa-lock\"></i></span>");
    }
    if project.university {
        links.push_str("<span title=\"University\"><i class=\"fas fa-university\"></i></span>");
    }

    let tags: String = project
        .tags
        .iter()
        .map(|t| format!("<span class=\"sphere-card-tag\">{}</span>", escape_html(t)))
        .collect();

    format!(
        "<div class=\"sphere-card-header\"><div class=\"sphere-card-icon\"><i class=\"{}\"></i></div><div class=\"sphere-card-links\">{}</div></div><h3>{}</h3><p>{}</p><div class=\"sphere-card-tags\">{}</div>",
        escape_html(&project.icon),
        links,
        escape_html(&project.title),
        escape_html(&project.description),
        tags
    )
}
