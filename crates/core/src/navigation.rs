//! Page paths of the public site.
//!
//! Carousel hosts use [`SitePage`] to know which page they are mounted on
//! (the course carousel resets per course listing, the testimonial rotator
//! only runs on the home page).

/// A leadership bio page under `/about`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderRole {
    Director,
    Dean,
    Advisors,
}

impl LeaderRole {
    fn slug(self) -> &'static str {
        match self {
            LeaderRole::Director => "director",
            LeaderRole::Dean => "dean",
            LeaderRole::Advisors => "advisors",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitePage {
    Home,
    Courses,
    Course { slug: String },
    About,
    Leader(LeaderRole),
    Blog,
    BlogPost { slug: String },
    Contact,
    CarouselDemo,
}

impl SitePage {
    /// Resolve a URL path. A trailing slash is ignored; unknown paths are `None`.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .trim_start_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let page = match segments.as_slice() {
            [] => SitePage::Home,
            ["courses"] => SitePage::Courses,
            ["courses", slug] => SitePage::Course {
                slug: (*slug).to_string(),
            },
            ["about"] => SitePage::About,
            ["about", "director"] => SitePage::Leader(LeaderRole::Director),
            ["about", "dean"] => SitePage::Leader(LeaderRole::Dean),
            ["about", "advisors"] => SitePage::Leader(LeaderRole::Advisors),
            ["blog"] => SitePage::Blog,
            ["blog", slug] => SitePage::BlogPost {
                slug: (*slug).to_string(),
            },
            ["contact"] => SitePage::Contact,
            ["carousel-demo"] => SitePage::CarouselDemo,
            _ => return None,
        };
        Some(page)
    }

    /// Canonical path for this page.
    pub fn path(&self) -> String {
        match self {
            SitePage::Home => "/".to_string(),
            SitePage::Courses => "/courses".to_string(),
            SitePage::Course { slug } => format!("/courses/{slug}"),
            SitePage::About => "/about".to_string(),
            SitePage::Leader(role) => format!("/about/{}", role.slug()),
            SitePage::Blog => "/blog".to_string(),
            SitePage::BlogPost { slug } => format!("/blog/{slug}"),
            SitePage::Contact => "/contact".to_string(),
            SitePage::CarouselDemo => "/carousel-demo".to_string(),
        }
    }
}
