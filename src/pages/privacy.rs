use leptos::prelude::*;
use leptos_router::components::A;
use wasm_bindgen::JsValue;

use crate::content::PRIVACY_POLICY;

fn today() -> String {
	js_sys::Date::new_0()
		.to_locale_date_string("en-GB", &JsValue::UNDEFINED)
		.into()
}

#[component]
pub fn Privacy() -> impl IntoView {
	let sections = PRIVACY_POLICY
		.iter()
		.map(|(heading, text, items)| {
			view! {
				<h2>{*heading}</h2>
				<p>{*text}</p>
				<Show when=move || !items.is_empty()>
					<ul>{items.iter().map(|item| view! { <li>{*item}</li> }).collect_view()}</ul>
				</Show>
			}
		})
		.collect_view();

	view! {
		<article class="privacy-policy">
			<h1>"Privacy Policy"</h1>
			{sections}
			<p class="privacy-updated">"Last updated: " {today()}</p>
			<A href="/">"Back to the map"</A>
		</article>
	}
}
