use std::env;

use simplelog::{Config, LevelFilter, SimpleLogger};
use soap_client::{soap_params, Client};

soap_params! {
    struct GetPrice {
        item: String => "Item",
    }
}

fn main() {
    SimpleLogger::init(LevelFilter::Debug, Config::default()).unwrap();

    let mut args = env::args().skip(1);
    let endpoint = args.next().unwrap_or_else(|| "http://127.0.0.1:8080/prices".to_owned());
    let item = args.next().unwrap_or_else(|| "Apple".to_owned());

    let client = match Client::new(
        &endpoint,
        [
            ("xmlns:soap", "http://schemas.xmlsoap.org/soap/envelope/"),
            ("xmlns:ws", "http://example.com/prices"),
        ],
    ) {
        Ok(client) => client,
        Err(err) => return println!("Invalid endpoint: {}", err),
    };

    match client.call("GetPrice", &GetPrice { item }) {
        Err(ref err) => println!("There was an error! {}", err),
        Ok(body) => println!("Response: {}", String::from_utf8_lossy(&body)),
    }
}
