//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::{
    NavigateOptions,
    components::{Route, Router, Routes},
    path,
};
use portal::config::ClientConfig;
use portal::http::HttpClient;
use portal::routes::RouteName;
use portal::session::Session;

use crate::components::guarded::Guarded;
use crate::components::notice_banner::NoticeBanner;
use crate::components::sidebar::Sidebar;
use crate::components::toolbar::Toolbar;
use crate::net::transport::GlooTransport;
use crate::pages::{
    admin::AdminPage, crop_plantings::CropPlantingsPage, dashboard::DashboardPage, farmers::FarmersPage,
    login::LoginPage, not_found::NotFoundPage, notifications::NotificationsPage, register::RegisterPage,
    technicians::TechniciansPage, users::UsersPage,
};
use crate::state::session::SessionContext;
use crate::state::ui::UiState;
use crate::util::theme;

/// Root application component.
///
/// Applies the stored theme and sets up client-side routing; everything that
/// needs the router lives in [`Shell`].
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let dark_mode = theme::read_preference();
    theme::apply(dark_mode);
    provide_context(RwSignal::new(UiState { dark_mode, ..UiState::default() }));

    view! {
        <Router>
            <Shell/>
        </Router>
    }
}

/// Session provider, chrome, and route table.
#[component]
fn Shell() -> impl IntoView {
    let config = ClientConfig::from_build_env();
    tracing::debug!(base_url = %config.base_url, "starting dashboard");
    let navigate = use_navigate();
    let session = Session::new(
        HttpClient::new(GlooTransport::new(config.base_url)),
        move |path: &str| navigate(path, NavigateOptions::default()),
    );
    let ctx = SessionContext::new(session.clone());
    provide_context(ctx);

    leptos::task::spawn_local(async move { session.init().await });

    let location = use_location();
    let title = move || format!("{} | Agriboard", RouteName::match_path(&location.pathname.get()).title());
    let signed_in = move || ctx.state().get().is_authenticated();

    view! {
        <Title text=title/>
        <div class="layout">
            <Show when=signed_in>
                <Sidebar/>
            </Show>
            <div class="layout__main">
                <Show when=signed_in>
                    <Toolbar/>
                </Show>
                <NoticeBanner/>
                <main class="layout__content">
                    <Routes fallback=|| view! { <NotFoundPage/> }>
                        <Route path=path!("/") view=|| view! { <Guarded route=RouteName::Home><span class="page-loading"></span></Guarded> }/>
                        <Route path=path!("/login") view=|| view! { <Guarded route=RouteName::Login><LoginPage/></Guarded> }/>
                        <Route path=path!("/register") view=|| view! { <Guarded route=RouteName::Register><RegisterPage/></Guarded> }/>
                        <Route path=path!("/dashboard") view=|| view! { <Guarded route=RouteName::Dashboard><DashboardPage/></Guarded> }/>
                        <Route path=path!("/dashboard/admin") view=|| view! { <Guarded route=RouteName::Admin><AdminPage/></Guarded> }/>
                        <Route path=path!("/users") view=|| view! { <Guarded route=RouteName::Users><UsersPage/></Guarded> }/>
                        <Route path=path!("/farmers") view=|| view! { <Guarded route=RouteName::Farmers><FarmersPage/></Guarded> }/>
                        <Route path=path!("/crop-plantings") view=|| view! { <Guarded route=RouteName::CropPlantings><CropPlantingsPage/></Guarded> }/>
                        <Route path=path!("/technicians") view=|| view! { <Guarded route=RouteName::Technicians><TechniciansPage/></Guarded> }/>
                        <Route path=path!("/notifications") view=|| view! { <Guarded route=RouteName::Notifications><NotificationsPage/></Guarded> }/>
                        <Route path=path!("/not-found") view=NotFoundPage/>
                    </Routes>
                </main>
            </div>
        </div>
    }
}
