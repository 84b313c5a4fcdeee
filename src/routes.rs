use crate::explore::ExplorePage;
use crate::profile::ProfilePage;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/explore")]
    Explore,
    #[at("/companion/:id")]
    Companion { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Redirect<Route> to={Route::Explore} /> },
        Route::Explore => html! { <ExplorePage /> },
        Route::Companion { id } => html! { <ProfilePage id={id} /> },
        Route::NotFound => html! {
            <div class="not-found">
                <h1>{ "Página não encontrada" }</h1>
                <Link<Route> to={Route::Explore}>{ "← Voltar para explorar" }</Link<Route>>
            </div>
        },
    }
}
