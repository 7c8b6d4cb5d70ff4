use leptos::prelude::*;

use super::resize_handle::ResizeHandle;
use super::use_workspace;
use crate::content::{Block, NavItem, Span, format};
use crate::graph::PanelWidth;
use crate::graph::selection::PanelSide;

fn spans_view(spans: Vec<Span>) -> impl IntoView {
	spans
		.into_iter()
		.map(|span| match span {
			Span::Plain(text) => text.into_any(),
			Span::Bold(text) => view! { <strong>{text}</strong> }.into_any(),
		})
		.collect_view()
}

fn block_view(block: Block) -> AnyView {
	match block {
		Block::Heading(text) => view! { <h2 class="modal-heading">{text}</h2> }.into_any(),
		Block::Bullet { level, spans } => {
			let class = if level == 0 { "modal-bullet" } else { "modal-bullet modal-bullet-nested" };
			view! { <p class=class>"• " {spans_view(spans)}</p> }.into_any()
		}
		Block::LinkItem { label, href } => view! {
			<p class="modal-bullet">
				"• "
				<a href=href target="_blank" rel="noopener noreferrer">
					{label}
				</a>
			</p>
		}
		.into_any(),
		Block::Paragraph(spans) => view! { <p class="modal-paragraph">{spans_view(spans)}</p> }.into_any(),
		Block::Break => view! { <br /> }.into_any(),
	}
}

#[component]
fn ModalBody(item: &'static NavItem) -> impl IntoView {
	let ws = use_workspace();
	let blocks = format(item.content).into_iter().map(block_view).collect_view();
	view! {
		<header class="modal-header">
			<h2 id="modal-title" class="modal-title">{item.label}</h2>
			<button
				class="panel-close"
				aria-label="Close"
				title="Close"
				on:click=move |_| ws.ui.update(|u| u.modal = None)
			>
				"×"
			</button>
		</header>
		<div class="modal-scroll">{blocks}</div>
	}
}

/// Left-hand panel showing one navigation text.
#[component]
pub fn InfoModal() -> impl IntoView {
	let ws = use_workspace();
	let item = Memo::new(move |_| ws.ui.with(|u| u.modal));
	let width = move || format!("{}%", ws.ui.with(|u| u.modal_width.percent()));
	let on_resize = Callback::new(move |w: PanelWidth| ws.ui.update(|u| u.modal_width = w));

	move || {
		item.get().map(|item| {
			view! {
				<aside
					class="side-panel side-panel-left"
					role="dialog"
					aria-labelledby="modal-title"
					style:width=width
				>
					<ModalBody item=item />
					<ResizeHandle side=PanelSide::Left on_resize=on_resize />
				</aside>
			}
		})
	}
}
