use std::{fs, sync::Arc};

use crate::{
    config::Config,
    storage::Collection,
    submissions::{ContactSubmission, NewsletterSubscriber},
};

pub struct AppState {
    pub config: Config,
    pub contacts: Collection<ContactSubmission>,
    pub subscribers: Collection<NewsletterSubscriber>,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        fs::create_dir_all(&config.data_dir).expect("Failed to create data directory");

        let contacts = Collection::new(config.data_dir.join("contacts.json"));
        let subscribers = Collection::new(config.data_dir.join("subscribers.json"));

        Arc::new(Self {
            config,
            contacts,
            subscribers,
        })
    }
}
