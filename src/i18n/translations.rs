use std::{collections::HashMap, sync::LazyLock};

use super::Language;

const EN: &[(&str, &str)] = &[
    // Navigation
    ("nav.products", "Products"),
    ("nav.orders", "Orders"),
    ("nav.admin", "Admin"),
    ("nav.language", "Language"),
    // Categories
    ("category.mutton", "Mutton"),
    ("category.chicken", "Chicken"),
    ("category.beef", "Beef"),
    // Cuts
    ("cut.leg", "Leg"),
    ("cut.breast", "Breast"),
    ("cut.thigh", "Thigh"),
    ("cut.belly", "Belly"),
    ("cut.shoulder", "Shoulder"),
    ("cut.ribs", "Ribs"),
    // General
    ("general.price", "Price"),
    ("general.addToCart", "Add to Cart"),
    ("general.viewDetails", "View Details"),
    ("general.admin", "Admin Dashboard"),
    ("general.orders", "Orders"),
    ("general.products", "Products"),
    ("general.manage", "Manage"),
    ("general.add", "Add"),
    ("general.update", "Update"),
    ("general.save", "Save"),
    ("general.cancel", "Cancel"),
    ("general.delete", "Delete"),
    ("general.edit", "Edit"),
    // Orders
    ("order.pending", "Pending"),
    ("order.packed", "Packed"),
    ("order.delivered", "Delivered"),
    ("order.cancelled", "Cancelled"),
    ("order.items", "Items"),
    ("order.total", "Total"),
    ("order.customer", "Customer"),
    ("order.date", "Date"),
    ("order.markPacked", "Mark as Packed"),
    ("order.markDelivered", "Mark as Delivered"),
    // Admin
    ("admin.addProduct", "Add New Product"),
    ("admin.productName", "Product Name"),
    ("admin.category", "Category"),
    ("admin.cut", "Cut"),
    ("admin.priceUSD", "Price (USD)"),
    ("admin.priceMYR", "Price (MYR)"),
    ("admin.description", "Description"),
    ("admin.stock", "Stock Quantity"),
    // Dashboard
    ("dashboard.welcome", "Welcome to FarmConnect"),
    (
        "dashboard.subtitle",
        "Premium meat delivery from farms to your restaurant",
    ),
    ("dashboard.totalOrders", "Total Orders"),
    ("dashboard.totalProducts", "Total Products"),
    ("dashboard.revenue", "Revenue"),
    ("dashboard.pendingOrders", "Pending Orders"),
];

const MS: &[(&str, &str)] = &[
    ("nav.products", "Produk"),
    ("nav.orders", "Pesanan"),
    ("nav.admin", "Admin"),
    ("nav.language", "Bahasa"),
    ("category.mutton", "Daging Kambing"),
    ("category.chicken", "Ayam"),
    ("category.beef", "Daging Lembu"),
    ("cut.leg", "Kaki"),
    ("cut.breast", "Dada"),
    ("cut.thigh", "Peha"),
    ("cut.belly", "Perut"),
    ("cut.shoulder", "Bahu"),
    ("cut.ribs", "Tulang Rusuk"),
    ("general.price", "Harga"),
    ("general.addToCart", "Tambah ke Troli"),
    ("general.viewDetails", "Lihat Butiran"),
    ("general.admin", "Panel Admin"),
    ("general.orders", "Pesanan"),
    ("general.products", "Produk"),
    ("general.manage", "Urus"),
    ("general.add", "Tambah"),
    ("general.update", "Kemaskini"),
    ("general.save", "Simpan"),
    ("general.cancel", "Batal"),
    ("general.delete", "Padam"),
    ("general.edit", "Edit"),
    ("order.pending", "Menunggu"),
    ("order.packed", "Dibungkus"),
    ("order.delivered", "Dihantar"),
    ("order.cancelled", "Dibatalkan"),
    ("order.items", "Item"),
    ("order.total", "Jumlah"),
    ("order.customer", "Pelanggan"),
    ("order.date", "Tarikh"),
    ("order.markPacked", "Tandakan Sebagai Dibungkus"),
    ("order.markDelivered", "Tandakan Sebagai Dihantar"),
    ("admin.addProduct", "Tambah Produk Baru"),
    ("admin.productName", "Nama Produk"),
    ("admin.category", "Kategori"),
    ("admin.cut", "Potongan"),
    ("admin.priceUSD", "Harga (USD)"),
    ("admin.priceMYR", "Harga (MYR)"),
    ("admin.description", "Penerangan"),
    ("admin.stock", "Kuantiti Stok"),
    ("dashboard.welcome", "Selamat Datang ke FarmConnect"),
    (
        "dashboard.subtitle",
        "Penghantaran daging premium dari ladang ke restoran anda",
    ),
    ("dashboard.totalOrders", "Jumlah Pesanan"),
    ("dashboard.totalProducts", "Jumlah Produk"),
    ("dashboard.revenue", "Hasil"),
    ("dashboard.pendingOrders", "Pesanan Menunggu"),
];

static EN_TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| EN.iter().copied().collect());
static MS_TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| MS.iter().copied().collect());

pub fn table(language: Language) -> &'static HashMap<&'static str, &'static str> {
    match language {
        Language::En => &EN_TABLE,
        Language::Ms => &MS_TABLE,
    }
}

/// Resolve `key` in the table of `language`; unknown keys come back as-is.
pub fn translate<'a>(language: Language, key: &'a str) -> &'a str {
    table(language).get(key).copied().unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_resolves_to_its_mapped_string() {
        for (key, value) in EN {
            assert_eq!(translate(Language::En, key), *value);
        }
        for (key, value) in MS {
            assert_eq!(translate(Language::Ms, key), *value);
        }
    }

    #[test]
    fn both_tables_cover_the_same_keys() {
        let mut en: Vec<_> = table(Language::En).keys().collect();
        let mut ms: Vec<_> = table(Language::Ms).keys().collect();
        en.sort();
        ms.sort();
        assert_eq!(en, ms);
    }

    #[test]
    fn absent_keys_are_returned_unchanged() {
        for key in ["order.refunded", "nav", "", "category.lamb"] {
            assert_eq!(translate(Language::En, key), key);
            assert_eq!(translate(Language::Ms, key), key);
        }
    }

    #[test]
    fn missing_key_does_not_fall_back_to_english() {
        assert_eq!(translate(Language::Ms, "category.beef"), "Daging Lembu");
        assert_eq!(translate(Language::Ms, "dashboard.unknown"), "dashboard.unknown");
    }
}
