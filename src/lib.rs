pub mod config;
pub mod data;
pub mod explore;
pub mod filter;
pub mod profile;
pub mod routes;

use config::AppConfig;
use data::{fetch_dataset, Dataset};
use log::{error, info};
use routes::{switch, Route};
use std::rc::Rc;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

/// Loaded dataset and configuration shared by every view.
#[derive(Clone)]
pub struct Directory {
    pub dataset: Rc<Dataset>,
    pub config: Rc<AppConfig>,
}

impl PartialEq for Directory {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.dataset, &other.dataset) && Rc::ptr_eq(&self.config, &other.config)
    }
}

#[derive(PartialEq, Clone)]
enum FetchStatus {
    Loading,
    Ready(Rc<Dataset>),
    Error(String),
}

#[function_component(App)]
fn app() -> Html {
    let config = use_memo(|_| AppConfig::from_document(), ());
    let status = use_state(|| FetchStatus::Loading);

    {
        let status = status.clone();
        let dataset_url = config.dataset_url.clone();

        use_effect_with_deps(
            move |_| {
                status.set(FetchStatus::Loading);

                let status = status.clone();
                spawn_local(async move {
                    match fetch_dataset(&dataset_url).await {
                        Ok(dataset) => status.set(FetchStatus::Ready(Rc::new(dataset))),
                        Err(err) => {
                            error!("Failed to load {}: {}", dataset_url, err);
                            status.set(FetchStatus::Error(err.to_string()));
                        }
                    }
                });

                || ()
            },
            (),
        );
    }

    let content = match &*status {
        FetchStatus::Loading => html! { <p class="status">{ "Carregando acompanhantes…" }</p> },
        FetchStatus::Error(message) => html! { <p class="status error">{ message }</p> },
        FetchStatus::Ready(dataset) => {
            let directory = Directory {
                dataset: dataset.clone(),
                config: config.clone(),
            };
            html! {
                <ContextProvider<Directory> context={directory}>
                    <BrowserRouter>
                        <Switch<Route> render={switch} />
                    </BrowserRouter>
                </ContextProvider<Directory>>
            }
        }
    };

    html! {
        <main class="app-container">
            { content }
        </main>
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    info!("Starting companion directory");
    yew::Renderer::<App>::new().render();
}
