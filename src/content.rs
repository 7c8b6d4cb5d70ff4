//! Static help texts and the small line-based formatter that renders them.
//!
//! The formatter understands exactly what the texts use: `# ` headings,
//! `- [label](url)` link items, `- ` and `  - ` bullets, `**bold**` runs and
//! blank lines.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavItem {
	pub id: &'static str,
	pub label: &'static str,
	/// Glyph shown in the collapsed sidebar.
	pub icon: &'static str,
	pub content: &'static str,
}

pub static NAV_ITEMS: [NavItem; 4] = [
	NavItem {
		id: "intro",
		label: "Introduction",
		icon: "ℹ",
		content: "# About this map\n\
This is an interactive relationship graph showing connections between **people**, **institutions**, **projects** and **methods** in the field of interactive and immersive art.\n\
\n\
# What you can find\n\
- **People**: artists, researchers and practitioners\n\
- **Institutions**: labs, universities and venues\n\
- **Projects**: funded and independent works\n\
- **Methods**: participatory and accessible practices\n  - each method lists steps, challenges and required materials",
	},
	NavItem {
		id: "howto",
		label: "How to use it",
		icon: "?",
		content: "# Graph view\n\
- Click and drag nodes to explore relationships\n\
- Hover over nodes to see their connections\n\
- Click a node to open its details\n\
- Scroll or use the zoom buttons to zoom, drag the background to pan\n\
\n\
# Table view\n\
- Entities are listed in four columns, one per type\n\
- Select a card to open its details\n\
\n\
**Search** highlights matching names, descriptions and methods in both views.",
	},
	NavItem {
		id: "accessibility",
		label: "Accessibility",
		icon: "♿",
		content: "# Accessibility\n\
This site supports screen readers and keyboard navigation. Use **Tab** to move through interactive elements and **Enter** to activate them.\n\
\n\
- The **table view** presents the same data without animation\n\
- Press **?** anywhere outside a text field to list keyboard shortcuts\n\
- Panels can be resized with the keyboard",
	},
	NavItem {
		id: "translation",
		label: "Translation Help",
		icon: "文",
		content: "# Translating this site\n\
To translate this site, enable your browser's built-in translation feature.\n\
\n\
- [Chrome: translate pages](https://support.google.com/chrome/answer/173424)\n\
- [Firefox: translations](https://support.mozilla.org/kb/website-translation)\n\
- [Safari: translate webpages](https://support.apple.com/guide/safari/translate-a-webpage-ibrw646b2ca2/mac)",
	},
];

/// A run of inline text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Span {
	Plain(String),
	Bold(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
	Heading(String),
	/// Bullet with nesting level (0 or 1).
	Bullet { level: u8, spans: Vec<Span> },
	LinkItem { label: String, href: String },
	Paragraph(Vec<Span>),
	Break,
}

/// Splits on `**`; odd segments are bold.
pub fn spans(line: &str) -> Vec<Span> {
	line.split("**")
		.enumerate()
		.filter(|(_, part)| !part.is_empty())
		.map(|(i, part)| {
			if i % 2 == 1 {
				Span::Bold(part.to_owned())
			} else {
				Span::Plain(part.to_owned())
			}
		})
		.collect()
}

fn link_item(line: &str) -> Option<Block> {
	let rest = line.strip_prefix("- [")?;
	let (label, rest) = rest.split_once("](")?;
	let (href, _) = rest.split_once(')')?;
	Some(Block::LinkItem {
		label: label.to_owned(),
		href: href.to_owned(),
	})
}

pub fn format(content: &str) -> Vec<Block> {
	content
		.lines()
		.map(|line| {
			if let Some(title) = line.strip_prefix("# ") {
				return Block::Heading(title.to_owned());
			}
			if let Some(link) = link_item(line) {
				return link;
			}
			if let Some(text) = line.strip_prefix("- ") {
				return Block::Bullet {
					level: 0,
					spans: spans(text),
				};
			}
			if let Some(text) = line.strip_prefix("  - ") {
				return Block::Bullet {
					level: 1,
					spans: spans(text),
				};
			}
			if line.trim().is_empty() {
				return Block::Break;
			}
			Block::Paragraph(spans(line))
		})
		.collect()
}

/// Sections of the privacy policy page: heading, paragraph, list items.
pub static PRIVACY_POLICY: [(&str, &str, &[&str]); 3] = [
	(
		"Data Collection",
		"The VOICE Knowledge Platform does not collect, store, or process any personal data from users. \
This website is a static information resource that displays research data without requiring \
user registration or personal information.",
		&[],
	),
	(
		"Technical Information",
		"This website uses:",
		&[
			"Tailwind CSS from CDN for styling (may set technical cookies)",
			"Vercel hosting platform for content delivery",
			"No tracking, analytics, or advertising cookies",
		],
	),
	(
		"Contact",
		"If you have questions about this privacy policy, please contact us through \
the project's official channels.",
		&[],
	),
];

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn formats_every_line_kind() {
		let blocks = format("# Title\n- [Docs](https://x.y/z)\n- a **b**\n  - nested\n\nplain **bold** tail");
		assert_eq!(
			blocks,
			vec![
				Block::Heading("Title".into()),
				Block::LinkItem {
					label: "Docs".into(),
					href: "https://x.y/z".into(),
				},
				Block::Bullet {
					level: 0,
					spans: vec![Span::Plain("a ".into()), Span::Bold("b".into())],
				},
				Block::Bullet {
					level: 1,
					spans: vec![Span::Plain("nested".into())],
				},
				Block::Break,
				Block::Paragraph(vec![
					Span::Plain("plain ".into()),
					Span::Bold("bold".into()),
					Span::Plain(" tail".into()),
				]),
			]
		);
	}

	#[test]
	fn broken_link_syntax_is_a_bullet() {
		assert!(matches!(format("- [oops")[0], Block::Bullet { level: 0, .. }));
	}

	#[test]
	fn nav_texts_all_start_with_heading() {
		for item in &NAV_ITEMS {
			assert!(matches!(format(item.content).first(), Some(Block::Heading(_))), "{}", item.id);
		}
	}
}
