//! Sample catalog inserted on first start-up when `menu_items` is empty.

use rust_decimal::Decimal;

use crate::domain::NewMenuItem;

const ENTRADAS: &str = "Entradas";
const FONDOS: &str = "Platos de fondo";
const BEBIDAS: &str = "Bebidas";
const POSTRES: &str = "Postres";

fn item(name: &str, description: &str, cents: i64, image: &str, category: &str) -> NewMenuItem {
    NewMenuItem {
        name: name.to_string(),
        description: Some(description.to_string()),
        price: Decimal::new(cents, 2),
        image_url: Some(image.to_string()),
        category: category.to_string(),
    }
}

/// The fixed starter menu, in insertion order.
pub fn sample_menu() -> Vec<NewMenuItem> {
    vec![
        item(
            "Lomo Saltado",
            "Trozos de lomo salteados con cebolla, tomate, papas fritas y arroz",
            1800,
            "/static/menu/lomo-saltado.jpg",
            FONDOS,
        ),
        item(
            "Yuquitas Crocantes",
            "Bastones de yuca frita con salsa huancaína",
            900,
            "https://perudelights.com/wp-content/uploads/2012/02/2-Friedyuccasticks.R.jpg3_.jpg",
            ENTRADAS,
        ),
        item(
            "Ají de Gallina",
            "Pollo deshilachado en crema de ají amarillo con arroz y papa",
            1600,
            "/static/menu/aji-de-gallina.jpg",
            FONDOS,
        ),
        item(
            "Papa a la Huancaína",
            "Papas sancochadas bañadas en salsa huancaína con huevo y aceituna",
            800,
            "/static/menu/papa-huancaina.jpg",
            ENTRADAS,
        ),
        item(
            "Ceviche Clásico",
            "Pescado fresco marinado en limón con cebolla, camote y choclo",
            2000,
            "/static/menu/ceviche.jpg",
            FONDOS,
        ),
        item(
            "Chicha Morada",
            "Bebida de maíz morado con piña y canela (vaso)",
            400,
            "/static/menu/chicha-morada.jpg",
            BEBIDAS,
        ),
        item(
            "Limonada Frozen",
            "Limonada licuada con hielo",
            500,
            "/static/menu/limonada.jpg",
            BEBIDAS,
        ),
        item(
            "Mazamorra Morada",
            "Postre de maíz morado con frutas secas",
            500,
            "/static/menu/mazamorra.jpg",
            POSTRES,
        ),
        item(
            "Arroz con Leche",
            "Arroz cocido en leche con canela y clavo",
            450,
            "/static/menu/arroz-con-leche.jpg",
            POSTRES,
        ),
    ]
}
