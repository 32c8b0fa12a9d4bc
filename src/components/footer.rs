//! Footer Component

use chrono::Datelike;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::routes;

#[component]
pub fn Footer() -> impl IntoView {
    let year = chrono::Local::now().year();

    view! {
        <footer class="footer">
            <div class="footer-grid">
                <div>
                    <A href=routes::HOME attr:class="brand">
                        <span class="brand-name">"FrontEndFix"</span>
                    </A>
                    <p class="muted">
                        "Crafting modern web experiences and fixing front-end issues with precision."
                    </p>
                </div>
                <div>
                    <h3>"Quick Links"</h3>
                    <ul class="footer-links">
                        <li><A href=routes::HOME>"Home"</A></li>
                        <li><A href=routes::PORTFOLIO>"Portfolio"</A></li>
                        <li><A href=routes::CONTACT>"Contact"</A></li>
                    </ul>
                </div>
                <div>
                    <h3>"Connect"</h3>
                    <ul class="footer-links">
                        <li><a href="https://github.com" target="_blank" rel="noopener">"GitHub"</a></li>
                        <li><a href="https://linkedin.com" target="_blank" rel="noopener">"LinkedIn"</a></li>
                        <li><a href="mailto:contact@frontendfix.com">"contact@frontendfix.com"</a></li>
                    </ul>
                </div>
            </div>
            <p class="copyright">{format!("© {} FrontEndFix. All rights reserved.", year)}</p>
        </footer>
    }
}
