use crate::domain::model::DeviceKind;
use serde_json::{json, Value};

/// One row of a device's service menu. Prices are flat rates in whole pesos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceEntry {
    pub code: &'static str,
    pub label: &'static str,
    pub price: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrandEntry {
    pub code: &'static str,
    pub label: &'static str,
}

const ANDROID_SERVICES: &[ServiceEntry] = &[
    ServiceEntry { code: "lcd", label: "LCD replacement", price: 600 },
    ServiceEntry { code: "amoled", label: "AMOLED replacement", price: 1300 },
    ServiceEntry { code: "back_cover", label: "Back cover replacement", price: 300 },
    ServiceEntry { code: "camera", label: "Camera module replacement", price: 1000 },
    ServiceEntry { code: "speaker", label: "Speaker replacement", price: 700 },
    ServiceEntry { code: "buttons", label: "Button replacement", price: 500 },
    ServiceEntry { code: "sub_board", label: "Sub-board replacement", price: 200 },
    ServiceEntry { code: "frame", label: "Frame replacement", price: 900 },
];

const IPHONE_SERVICES: &[ServiceEntry] = &[
    ServiceEntry { code: "lcd", label: "LCD replacement", price: 800 },
    ServiceEntry { code: "amoled", label: "AMOLED replacement", price: 1500 },
    ServiceEntry { code: "back_cover", label: "Back cover replacement", price: 1400 },
    ServiceEntry { code: "camera", label: "Camera module replacement", price: 3000 },
    ServiceEntry { code: "speaker", label: "Speaker replacement", price: 1300 },
    ServiceEntry { code: "buttons", label: "Button replacement", price: 1000 },
    ServiceEntry { code: "sub_board", label: "Sub-board replacement", price: 500 },
    ServiceEntry { code: "frame", label: "Frame replacement", price: 1000 },
];

const LAPTOP_SERVICES: &[ServiceEntry] = &[
    ServiceEntry { code: "laptop_lcd", label: "Laptop LCD replacement", price: 2100 },
    ServiceEntry { code: "keyboard", label: "Keyboard replacement", price: 2000 },
    ServiceEntry { code: "ram", label: "RAM upgrade", price: 1150 },
    ServiceEntry { code: "storage", label: "SSD / HDD replacement", price: 1500 },
    ServiceEntry { code: "fan", label: "Fan replacement", price: 1100 },
    ServiceEntry { code: "thermal", label: "Thermal repaste (no soldering)", price: 500 },
    ServiceEntry { code: "frame", label: "Palm rest / frame replacement", price: 2000 },
    ServiceEntry { code: "io_board", label: "Sub-board / IO board swap", price: 2600 },
];

const ANDROID_BRANDS: &[BrandEntry] = &[
    BrandEntry { code: "samsung", label: "Samsung" },
    BrandEntry { code: "google", label: "Google Pixel" },
    BrandEntry { code: "xiaomi", label: "Xiaomi" },
    BrandEntry { code: "oppo", label: "OPPO" },
    BrandEntry { code: "vivo", label: "Vivo" },
    BrandEntry { code: "realme", label: "Realme" },
    BrandEntry { code: "oneplus", label: "OnePlus" },
    BrandEntry { code: "huawei", label: "Huawei" },
    BrandEntry { code: "honor", label: "HONOR" },
    BrandEntry { code: "motorola", label: "Motorola" },
    BrandEntry { code: "nokia", label: "Nokia" },
    BrandEntry { code: "nothing", label: "Nothing" },
    BrandEntry { code: "lenovo", label: "Lenovo" },
    BrandEntry { code: "asus", label: "ASUS" },
    BrandEntry { code: "sony", label: "Sony Xperia" },
    BrandEntry { code: "lg", label: "LG" },
    BrandEntry { code: "tecno", label: "Tecno" },
    BrandEntry { code: "infinix", label: "Infinix" },
    BrandEntry { code: "itel", label: "Itel" },
    BrandEntry { code: "zte", label: "ZTE" },
    BrandEntry { code: "meizu", label: "Meizu" },
    BrandEntry { code: "poco", label: "POCO" },
    BrandEntry { code: "panasonic", label: "Panasonic" },
    BrandEntry { code: "sharp", label: "Sharp" },
    BrandEntry { code: "blackview", label: "Blackview" },
    BrandEntry { code: "doogee", label: "Doogee" },
    BrandEntry { code: "cat", label: "Cat" },
    BrandEntry { code: "fairphone", label: "Fairphone" },
    BrandEntry { code: "kyocera", label: "Kyocera" },
    BrandEntry { code: "lava", label: "Lava" },
    BrandEntry { code: "micromax", label: "Micromax" },
    BrandEntry { code: "iqoo", label: "iQOO" },
    BrandEntry { code: "cubot", label: "Cubot" },
    BrandEntry { code: "ulefone", label: "Ulefone" },
    BrandEntry { code: "other", label: "Other / not listed" },
];

const IPHONE_BRANDS: &[BrandEntry] = &[BrandEntry { code: "apple", label: "Apple" }];

const LAPTOP_BRANDS: &[BrandEntry] = &[
    BrandEntry { code: "acer", label: "Acer" },
    BrandEntry { code: "asus", label: "ASUS" },
    BrandEntry { code: "dell", label: "Dell" },
    BrandEntry { code: "hp", label: "HP" },
    BrandEntry { code: "lenovo", label: "Lenovo" },
    BrandEntry { code: "msi", label: "MSI" },
    BrandEntry { code: "razer", label: "Razer" },
    BrandEntry { code: "gigabyte", label: "Gigabyte" },
    BrandEntry { code: "samsung", label: "Samsung" },
    BrandEntry { code: "huawei", label: "Huawei" },
    BrandEntry { code: "lg", label: "LG" },
    BrandEntry { code: "microsoft", label: "Microsoft Surface" },
    BrandEntry { code: "framework", label: "Framework" },
    BrandEntry { code: "alienware", label: "Alienware" },
    BrandEntry { code: "acerpredator", label: "Acer Predator" },
    BrandEntry { code: "evga", label: "EVGA" },
    BrandEntry { code: "dynabook", label: "Dynabook" },
    BrandEntry { code: "fujitsu", label: "Fujitsu" },
    BrandEntry { code: "chuwi", label: "Chuwi" },
    BrandEntry { code: "xpg", label: "XPG / Tongfang" },
    BrandEntry { code: "avita", label: "Avita" },
    BrandEntry { code: "other", label: "Other / not listed" },
];

pub fn services_for(device: DeviceKind) -> &'static [ServiceEntry] {
    match device {
        DeviceKind::Android => ANDROID_SERVICES,
        DeviceKind::Iphone => IPHONE_SERVICES,
        DeviceKind::Laptop => LAPTOP_SERVICES,
    }
}

pub fn brands_for(device: DeviceKind) -> &'static [BrandEntry] {
    match device {
        DeviceKind::Android => ANDROID_BRANDS,
        DeviceKind::Iphone => IPHONE_BRANDS,
        DeviceKind::Laptop => LAPTOP_BRANDS,
    }
}

pub fn price_for(device: DeviceKind, service_code: &str) -> Option<u32> {
    services_for(device)
        .iter()
        .find(|s| s.code == service_code)
        .map(|s| s.price)
}

/// Label lookup across all device menus, falling back to the raw code.
pub fn service_label(service_code: &str) -> &str {
    for device in DeviceKind::ALL {
        if let Some(entry) = services_for(device).iter().find(|s| s.code == service_code) {
            return entry.label;
        }
    }
    service_code
}

pub fn brand_label(brand_code: &str) -> &str {
    for device in DeviceKind::ALL {
        if let Some(entry) = brands_for(device).iter().find(|b| b.code == brand_code) {
            return entry.label;
        }
    }
    brand_code
}

/// Known models per (device, brand). Brands without a list accept any model.
pub fn model_suggestions(device: DeviceKind, brand_code: &str) -> &'static [&'static str] {
    match (device, brand_code) {
        (DeviceKind::Android, "samsung") => &[
            "Galaxy S24 Ultra", "Galaxy S24+", "Galaxy S24", "Galaxy S23 FE", "Galaxy S23",
            "Galaxy Z Flip 6", "Galaxy Z Fold 6", "Galaxy A55", "Galaxy A54", "Galaxy A53",
            "Galaxy A35", "Galaxy A34", "Galaxy A25", "Galaxy A15 5G", "Galaxy A14 5G",
            "Galaxy A05s", "Galaxy M55", "Galaxy Xcover 6 Pro",
        ],
        (DeviceKind::Android, "xiaomi") => &[
            "Xiaomi 14 Ultra", "Xiaomi 14", "Xiaomi 13T", "Redmi Note 13 Pro+",
            "Redmi Note 13 Pro", "Redmi Note 13", "Redmi Note 12", "Redmi Note 11",
            "Redmi Note 10 Pro", "Redmi 14C", "Redmi 13C", "Redmi 12C", "Redmi 10",
            "Redmi 9A", "Redmi A3", "Poco X6 Pro", "Poco F6", "Xiaomi 12 Lite",
        ],
        (DeviceKind::Android, "oppo") => &[
            "Find X7 Ultra", "Find X7", "Find N3", "Find N3 Flip", "Reno12 Pro", "Reno12",
            "Reno11 Pro", "Reno10 Pro+", "A3 Pro 5G", "A98 5G", "A79 5G", "A78 5G", "A77s",
            "A58", "A57", "A17", "A16", "A15",
        ],
        (DeviceKind::Android, "vivo") => &[
            "X100 Pro", "X100", "X90 Pro", "X80", "V30 Pro", "V30", "V29e", "V27e", "V25",
            "Y200", "Y100", "Y36", "Y27s", "Y22s", "Y17s", "Y16", "iQOO 12", "iQOO Neo9",
        ],
        (DeviceKind::Android, "realme") => &[
            "Realme C33", "Realme C35", "Realme C53", "Realme C55", "Realme C65", "Realme C67",
            "Realme 9", "Realme 10", "Realme 11", "Realme 12", "Realme 12 Pro+ 5G",
            "Realme GT 5", "Realme GT Neo 3", "Realme Narzo 50", "Realme Narzo 70 Pro",
            "Realme XT", "Realme X2",
        ],
        (DeviceKind::Android, "oneplus") => &[
            "OnePlus 12", "OnePlus 12R", "Nord CE 4", "OnePlus 11R", "Nord N30",
            "OnePlus Ace 3", "Nord 3",
        ],
        (DeviceKind::Android, "huawei") => &[
            "Nova 12i", "P60 Pro", "Mate 50", "Y9a", "Nova 11i", "Mate X3",
        ],
        (DeviceKind::Android, "honor") => &[
            "Magic6 Pro", "X9b", "Magic Vs", "X7a", "90 Lite", "Magic5 Pro",
        ],
        (DeviceKind::Android, "motorola") => &[
            "Edge 40", "Moto G Stylus", "Razr 40 Ultra", "Moto G54", "Edge 30 Neo",
            "Moto G Power 5G",
        ],
        (DeviceKind::Android, "nokia") => &["G60", "XR21", "C32", "X30", "G310", "C12 Pro"],
        (DeviceKind::Android, "asus") => &[
            "ROG Phone 8", "Zenfone 10", "ROG Phone 7", "Zenfone 9",
        ],
        (DeviceKind::Android, "sony") => &[
            "Xperia 1 V", "Xperia 5 V", "Xperia 10 V", "Xperia 1 IV",
        ],
        (DeviceKind::Android, "lg") => &["Wing", "Velvet", "V60 ThinQ"],
        (DeviceKind::Android, "tecno") => &[
            "Camon 20", "Camon 20 Pro", "Camon 19", "Camon 18P", "Camon 30 5G", "Pova 6 Pro",
            "Pova 5G", "Spark 20 Pro", "Spark 10", "Spark Go 2024", "Phantom X2",
            "Phantom V Flip", "Tecno Pop 5",
        ],
        (DeviceKind::Android, "infinix") => &[
            "Zero 30", "Zero Ultra", "Note 40 Pro+", "Note 30", "Hot 40 Pro", "Hot 30i",
            "Smart 8", "Smart 7", "GT 20 Pro", "GT 10 Pro",
        ],
        (DeviceKind::Android, "itel") => &[
            "P55 5G", "P55+", "P40", "S24 Ultra", "S24", "S23+", "S23", "A70", "C55",
        ],
        (DeviceKind::Android, "zte") => &["Axon 50", "RedMagic 9 Pro", "Axon 40", "RedMagic 8"],
        (DeviceKind::Android, "meizu") => &["Meizu 21", "18s Pro", "20 Infinity"],
        (DeviceKind::Android, "poco") => &[
            "Poco F6 Pro", "Poco F6", "Poco F5", "Poco X6 Pro", "Poco X6", "Poco X5 Pro 5G",
            "Poco M6 Pro", "Poco M5s", "Poco C65", "Poco C55", "Poco C40", "Poco F1",
        ],
        (DeviceKind::Android, "panasonic") => &["Eluga I8", "Eluga X1"],
        (DeviceKind::Android, "sharp") => &["Aquos R7", "Aquos Sense8"],
        (DeviceKind::Android, "blackview") => &["BV9800 Pro", "BV9200", "N6000"],
        (DeviceKind::Android, "doogee") => &["S100 Pro", "V30", "Smini"],
        (DeviceKind::Android, "cat") => &["Cat S75", "Cat S62 Pro"],
        (DeviceKind::Android, "fairphone") => &["Fairphone 5", "Fairphone 4"],
        (DeviceKind::Android, "kyocera") => &["DuraForce Ultra 5G", "DuraSport 5G"],
        (DeviceKind::Android, "lava") => &["Agni 2", "Blaze 2", "Yuva 3 Pro"],
        (DeviceKind::Android, "micromax") => &["In 2c", "In Note 2"],
        (DeviceKind::Android, "iqoo") => &["iQOO 12", "iQOO Neo 9 Pro", "iQOO Z7"],
        (DeviceKind::Android, "cubot") => &["Pocket 3", "KingKong Star"],
        (DeviceKind::Android, "ulefone") => &["Power Armor 18T", "Armor 24"],
        (DeviceKind::Iphone, "apple") => &[
            "iPhone 15 Pro Max", "iPhone 15 Pro", "iPhone 15", "iPhone 14 Pro", "iPhone 14",
            "iPhone 13", "iPhone 13 mini", "iPhone 12", "iPhone SE (3rd Gen)", "iPhone 11",
            "iPhone XR", "iPhone XS", "iPhone X", "iPhone 7", "iPhone 6s", "iPhone 6",
        ],
        (DeviceKind::Laptop, "acer") => &[
            "Aspire 3", "Aspire 5", "Aspire 7", "Aspire Go", "Swift 14", "Swift Go 14",
            "Nitro 5", "Nitro V 15", "Nitro 16", "Predator Helios 16", "TravelMate P4",
            "Extensa 15", "Acer Chromebook 314", "Aspire One",
        ],
        (DeviceKind::Laptop, "asus") => &[
            "Zenbook 14", "Zenbook S 16", "Zenbook Duo", "Vivobook Go 15", "Vivobook S 15",
            "Vivobook Flip 14", "ROG Zephyrus G14", "ROG Strix G18", "ROG Flow X13",
            "TUF Gaming A15", "TUF Gaming F16", "ProArt StudioBook 16", "ExpertBook B9",
            "ASUS Chromebook CX34",
        ],
        (DeviceKind::Laptop, "dell") => &[
            "Inspiron 15 3520", "Inspiron 15 3511", "Inspiron 14 5402", "Inspiron 16 5630",
            "G3 15 3500", "G5 15 5500", "G7 15 7500", "Precision 5550", "Alienware m15 R6",
            "Alienware x17 R2", "Chromebook 11 3100",
        ],
        (DeviceKind::Laptop, "hp") => &[
            "HP 14-dw1000", "HP 15-EF0021", "Victus 15-fa0031", "Omen 16-b1000",
            "Spectre x360 14-ef0000", "Envy x360 15-ey0000", "ProBook 450 G10",
            "EliteBook 840 G10", "ZBook Power G10", "HP Chromebook 14a",
        ],
        (DeviceKind::Laptop, "lenovo") => &[
            "ThinkPad T14 Gen 4", "ThinkPad X1 Carbon Gen 11", "ThinkPad X13 Gen 4",
            "ThinkPad E14 Gen 5", "ThinkBook 14 Gen 6", "IdeaPad 3 15", "IdeaPad Slim 5",
            "IdeaPad Flex 5 14", "Legion 5 Pro 16", "Legion Slim 7", "Yoga 7i",
            "Lenovo Chromebook Duet",
        ],
        (DeviceKind::Laptop, "msi") => &[
            "Stealth 16 Studio", "Raider GE78", "Cyborg 15", "Modern 14",
        ],
        (DeviceKind::Laptop, "razer") => &[
            "Blade 16", "Blade 18", "Blade 15", "Blade Stealth 13",
        ],
        (DeviceKind::Laptop, "gigabyte") => &["Aero 16", "Aorus 17", "G5 KF", "Aero 14"],
        (DeviceKind::Laptop, "samsung") => &[
            "Galaxy Book4 Pro", "Galaxy Book3", "Galaxy Book2 360", "Galaxy Book Flex2",
        ],
        (DeviceKind::Laptop, "huawei") => &[
            "MateBook X Pro", "MateBook D16", "MateBook 14s", "MateBook D15",
        ],
        (DeviceKind::Laptop, "lg") => &[
            "Gram 17", "Gram SuperSlim", "Gram Style", "Gram 16 2-in-1",
        ],
        (DeviceKind::Laptop, "microsoft") => &[
            "Surface Laptop 6", "Surface Laptop Studio 2", "Surface Go 4", "Surface Pro 9",
        ],
        (DeviceKind::Laptop, "framework") => &["Framework Laptop 13", "Framework Laptop 16"],
        (DeviceKind::Laptop, "alienware") => &["x16 R2", "m18 R2", "x14", "x14 R2"],
        (DeviceKind::Laptop, "acerpredator") => &[
            "Predator Helios 300", "Triton 17 X", "Helios Neo 16",
        ],
        (DeviceKind::Laptop, "evga") => &["EVGA SC17"],
        (DeviceKind::Laptop, "dynabook") => &["Tecra A40", "Portégé X40"],
        (DeviceKind::Laptop, "fujitsu") => &["Lifebook U9313", "UH-X"],
        (DeviceKind::Laptop, "chuwi") => &["GemiBook Plus", "Hi10 X Pro"],
        (DeviceKind::Laptop, "xpg") => &["XPG Xenia 15", "Xenia 16 Pro"],
        (DeviceKind::Laptop, "avita") => &["Liber V14", "Essential 14"],
        _ => &[],
    }
}

fn normalize_model(model: &str) -> String {
    model.replace('-', " ").to_lowercase()
}

/// Case-insensitive membership check after hyphen normalization. Vacuously
/// true when the brand carries no suggestion list.
pub fn is_known_model(device: DeviceKind, brand_code: &str, model: &str) -> bool {
    let suggestions = model_suggestions(device, brand_code);
    if suggestions.is_empty() {
        return true;
    }
    let normalized = normalize_model(model);
    suggestions.iter().any(|m| normalize_model(m) == normalized)
}

/// `{device: [{value, label}]}`，前端下拉選單用
pub fn service_map() -> Value {
    let mut map = serde_json::Map::new();
    for device in DeviceKind::ALL {
        let entries: Vec<Value> = services_for(device)
            .iter()
            .map(|s| json!({"value": s.code, "label": s.label}))
            .collect();
        map.insert(device.code().to_string(), Value::Array(entries));
    }
    Value::Object(map)
}

pub fn brand_map() -> Value {
    let mut map = serde_json::Map::new();
    for device in DeviceKind::ALL {
        let entries: Vec<Value> = brands_for(device)
            .iter()
            .map(|b| json!({"value": b.code, "label": b.label}))
            .collect();
        map.insert(device.code().to_string(), Value::Array(entries));
    }
    Value::Object(map)
}

pub fn model_map() -> Value {
    let mut map = serde_json::Map::new();
    for device in DeviceKind::ALL {
        let mut per_brand = serde_json::Map::new();
        for brand in brands_for(device) {
            let models = model_suggestions(device, brand.code);
            if !models.is_empty() {
                per_brand.insert(brand.code.to_string(), json!(models));
            }
        }
        map.insert(device.code().to_string(), Value::Object(per_brand));
    }
    Value::Object(map)
}

pub fn pricing_map() -> Value {
    let mut map = serde_json::Map::new();
    for device in DeviceKind::ALL {
        let mut per_service = serde_json::Map::new();
        for entry in services_for(device) {
            per_service.insert(entry.code.to_string(), json!(entry.price));
        }
        map.insert(device.code().to_string(), Value::Object(per_service));
    }
    Value::Object(map)
}
