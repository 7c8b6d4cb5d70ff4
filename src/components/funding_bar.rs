use leptos::prelude::*;

/// Funder logos pinned to the bottom-right corner.
#[component]
pub fn FundingBar() -> impl IntoView {
	view! {
		<div class="funding-bar">
			<img src="/UKRI-Logo_Horiz-RGB.png" alt="UKRI" />
			<img src="/eu_co_funded_en.jpg" alt="EU Co-funded" />
		</div>
	}
}
