use web_sys::CanvasRenderingContext2d;

use super::state::MapState;

const BACKGROUND: &str = "#ffffff";
const LINK_COLOR: &str = "#999";
const LABEL_FONT: &str = "bold 18px sans-serif";
const LINE_HEIGHT: f64 = 22.0;
/// Labels wrap inside a 260 x 180 box centred on the node.
const LABEL_WIDTH: f64 = 260.0;
const LABEL_HEIGHT: f64 = 180.0;

pub fn render(state: &MapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_global_alpha(1.0);
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	let t = state.controller.transform();
	ctx.save();
	let _ = ctx.translate(t.x, t.y);
	let _ = ctx.scale(t.k, t.k);
	draw_links(state, ctx);
	draw_labels(state, ctx);
	ctx.restore();
}

fn draw_links(state: &MapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(LINK_COLOR);
	for link in state.links() {
		let (Some((x1, y1)), Some((x2, y2))) = (
			state.sim.position(&link.source),
			state.sim.position(&link.target),
		) else {
			continue;
		};
		ctx.set_global_alpha(state.controller.link_opacity(link));
		ctx.set_line_width(link.line_width());
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_labels(state: &MapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font(LABEL_FONT);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let measure = |s: &str| ctx.measure_text(s).map(|m| m.width()).unwrap_or(0.0);

	for node in state.nodes() {
		let Some((x, y)) = state.sim.position(&node.id) else {
			continue;
		};
		let lines = wrap_words(&node.name, LABEL_WIDTH, measure);
		let max_lines = (LABEL_HEIGHT / LINE_HEIGHT).floor() as usize;
		let lines = &lines[..lines.len().min(max_lines)];

		let scale = state.controller.label_scale(&node.id);
		ctx.save();
		let _ = ctx.translate(x, y);
		let _ = ctx.scale(scale, scale);
		ctx.set_global_alpha(state.controller.node_opacity(&node.id, state.highlighted()));
		ctx.set_fill_style_str(node.kind().color());
		let top = -(lines.len().saturating_sub(1) as f64) * LINE_HEIGHT / 2.0;
		for (i, line) in lines.iter().enumerate() {
			let _ = ctx.fill_text(line, 0.0, top + i as f64 * LINE_HEIGHT);
		}
		ctx.restore();
	}
}

/// Greedy word wrap. A single word wider than `max_width` gets its own line.
pub fn wrap_words(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
	let mut lines = Vec::new();
	let mut current = String::new();
	for word in text.split_whitespace() {
		if current.is_empty() {
			current.push_str(word);
			continue;
		}
		let candidate = format!("{current} {word}");
		if measure(&candidate) <= max_width {
			current = candidate;
		} else {
			lines.push(std::mem::replace(&mut current, word.to_owned()));
		}
	}
	if !current.is_empty() {
		lines.push(current);
	}
	lines
}

#[cfg(test)]
mod tests {
	use super::*;

	fn chars(s: &str) -> f64 {
		s.chars().count() as f64
	}

	#[test]
	fn wraps_at_word_boundaries() {
		assert_eq!(
			wrap_words("Participatory sound mapping lab", 15.0, chars),
			vec!["Participatory", "sound mapping", "lab"]
		);
	}

	#[test]
	fn long_word_stands_alone_and_blank_is_empty() {
		assert_eq!(wrap_words("Supercalifragilistic", 5.0, chars), vec!["Supercalifragilistic"]);
		assert!(wrap_words("   ", 10.0, chars).is_empty());
	}
}
