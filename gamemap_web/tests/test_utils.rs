#[cfg(test)]
pub mod tests {
    use std::sync::Arc;

    use gamemap_app::{config::Config, session::Session, test_utils::tests::MockBackendGateway};
    use gamemap_types::{
        errors::ApplicationError,
        game::Game,
        geometry::ImageSize,
        marker::Marker,
    };
    use gamemap_web::{AppState, WebRouter};

    pub struct TestApp {
        pub base_url: String,
        pub gateway: MockBackendGateway,
        pub client: reqwest::Client,
    }

    impl TestApp {
        pub fn url(&self, path: &str) -> String {
            format!("{}{}", self.base_url, path)
        }

        /// Posts a url-encoded form and returns the page it redirects to.
        pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> String {
            self.client
                .post(self.url(path))
                .form(form)
                .send()
                .await
                .unwrap()
                .text()
                .await
                .unwrap()
        }

        pub async fn get_json(&self, path: &str) -> serde_json::Value {
            self.client
                .get(self.url(path))
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap()
        }
    }

    fn marker(id: i64, title: &str, kind: &str) -> Marker {
        Marker {
            id,
            game_id: 1,
            lat: id as f64 * 100.0,
            lng: id as f64 * 50.0,
            title: title.to_string(),
            kind: Some(kind.to_string()),
            game_coords: None,
            note: None,
            image_path: None,
        }
    }

    pub async fn setup_web_app() -> Result<TestApp, ApplicationError> {
        let gateway = MockBackendGateway::new();
        gateway.add_game(
            Game {
                id: 1,
                name: "Dungeon".to_string(),
                map_path: "dungeon.png".to_string(),
            },
            ImageSize {
                width: 1024,
                height: 768,
            },
        );
        gateway.add_game(
            Game {
                id: 2,
                name: "Forest".to_string(),
                map_path: "forest.png".to_string(),
            },
            ImageSize {
                width: 512,
                height: 512,
            },
        );
        gateway.add_marker(Marker {
            note: Some("Main entrance, watch for guards".to_string()),
            game_coords: Some("X: 12, Y: 40".to_string()),
            ..marker(1, "North Gate", "base")
        });
        gateway.add_marker(marker(2, "Gatehouse", "military"));
        gateway.add_marker(Marker {
            image_path: Some("/static/uploads/1700000000_well.png".to_string()),
            ..marker(3, "Well", "resource")
        });
        gateway.add_marker(marker(4, "Crypt", "danger"));

        let session = Arc::new(Session::new(
            Arc::new(gateway.clone()),
            Arc::new(Config::default()),
        ));
        session.load_games().await?;

        let router = WebRouter::router(AppState::new(session));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Ok(TestApp {
            base_url: format!("http://{addr}"),
            gateway,
            client: reqwest::Client::new(),
        })
    }
}
