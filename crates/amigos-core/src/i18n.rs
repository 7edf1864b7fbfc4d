//! Static translation table.
//!
//! Lookups never fail: a missing Portuguese string falls back to Spanish,
//! and an unknown key is returned unchanged.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
    Pt,
}

struct Entry {
    es: &'static str,
    en: &'static str,
    pt: Option<&'static str>,
}

macro_rules! entries {
    (@pt $pt:literal) => { Some($pt) };
    (@pt) => { None };
    ($( $key:literal => ($es:literal, $en:literal $(, $pt:literal)?) ),* $(,)?) => {
        &[ $( ($key, Entry { es: $es, en: $en, pt: entries!(@pt $($pt)?) }) ),* ]
    };
}

static ENTRIES: &[(&str, Entry)] = entries! {
    // Navigation
    "home" => ("Inicio", "Home", "Início"),
    "dashboard" => ("Panel", "Dashboard", "Painel"),
    "admin" => ("Admin", "Admin", "Admin"),
    "referral" => ("Referidos", "Referrals", "Indicações"),
    "transactions" => ("Transacciones", "Transactions", "Transações"),
    "notFound" => ("Página no encontrada", "Page not found", "Página não encontrada"),

    // Wallet
    "connectWallet" => ("Conectar Wallet", "Connect Wallet", "Conectar Carteira"),
    "disconnectWallet" => ("Desconectar", "Disconnect", "Desconectar"),
    "connected" => ("Conectado", "Connected", "Conectado"),
    "balance" => ("Balance", "Balance", "Saldo"),

    // Referrals
    "referralProgram" => ("Programa de Referidos", "Referral Program"),
    "earnCommissions" => ("Gana comisiones invitando amigos", "Earn commissions by inviting friends"),
    "totalReferrals" => ("Total Referidos", "Total Referrals"),
    "totalEarned" => ("Total Ganado", "Total Earned"),
    "referralCode" => ("Código de Referido", "Referral Code"),
    "referralLink" => ("Link de Referidos", "Referral Link", "Link de Indicação"),
    "yourReferralLink" => ("Tu Link de Referido", "Your Referral Link"),
    "shareThisLink" => ("Comparte este link para ganar comisiones", "Share this link to earn commissions"),
    "copyLink" => ("Copiar Link", "Copy Link", "Copiar Link"),
    "copied" => ("Copiado", "Copied"),
    "linkCopied" => ("Link copiado al portapapeles", "Link copied to clipboard"),
    "shareOnTwitter" => ("Compartir en Twitter", "Share on Twitter"),
    "shareOnFacebook" => ("Compartir en Facebook", "Share on Facebook"),
    "shareOnTelegram" => ("Compartir en Telegram", "Share on Telegram"),
    "shareOnWhatsApp" => ("Compartir en WhatsApp", "Share on WhatsApp"),
    "joinAmigosDeTron" => ("Únete a AMIGOS DE TRON y gana TRX", "Join AMIGOS DE TRON and earn TRX"),
    "commissionStructure" => ("Estructura de Comisiones", "Commission Structure"),
    "earnFromReferrals" => ("Gana de cada compra de tus referidos", "Earn from each purchase of your referrals"),
    "directReferral" => ("Referido Directo", "Direct Referral"),
    "fromDirectPurchases" => ("De las compras directas", "From direct purchases"),
    "matrixCommission" => ("Comisión de Matriz", "Matrix Commission"),
    "fromMatrixPosition" => ("De tu posición en la matriz", "From your matrix position"),
    "burnContribution" => ("Contribución a Quema", "Burn Contribution"),
    "automaticBurn" => ("Quema automática de TRX", "Automatic TRX burn"),
    "peopleWhoJoined" => ("Personas que se unieron con tu link", "People who joined with your link"),
    "yourReferrals" => ("Tus Referidos", "Your Referrals"),
    "noReferralsYet" => ("Aún no tienes referidos", "No referrals yet"),
    "connectWalletToViewReferrals" => ("Conecta tu wallet para ver tus referidos", "Connect your wallet to view your referrals"),

    // Transactions
    "transactionHistory" => ("Historial de Transacciones", "Transaction History"),
    "viewAllTransactions" => ("Ver todas tus transacciones", "View all your transactions"),
    "refresh" => ("Actualizar", "Refresh"),
    "totalPurchases" => ("Total Compras", "Total Purchases"),
    "totalCommissions" => ("Total Comisiones", "Total Commissions"),
    "totalBurned" => ("Total Quemado", "Total Burned", "Total Queimado"),
    "allTransactions" => ("Todas las Transacciones", "All Transactions"),
    "completeHistory" => ("Historial completo de tu actividad", "Complete history of your activity"),
    "loading" => ("Cargando...", "Loading..."),
    "noTransactionsYet" => ("Aún no tienes transacciones", "No transactions yet"),
    "purchase" => ("Compra", "Purchase"),
    "commission" => ("Comisión", "Commission"),
    "burn" => ("Quema", "Burn"),
    "from" => ("De", "From"),
    "aboutTransactions" => ("Sobre las Transacciones", "About Transactions"),
    "purchaseInfo" => ("Las compras son pagos que realizas para adquirir planes", "Purchases are payments you make to acquire plans"),
    "commissionInfo" => ("Las comisiones son ganancias automáticas de tus referidos", "Commissions are automatic earnings from your referrals"),
    "burnInfo" => ("El 25% de cada transacción se quema permanentemente", "25% of each transaction is permanently burned"),
    "allTransactionsOnChain" => ("Todas las transacciones están registradas en la blockchain de TRON y son inmutables", "All transactions are recorded on the TRON blockchain and are immutable"),
    "connectWalletToViewTransactions" => ("Conecta tu wallet para ver tus transacciones", "Connect your wallet to view your transactions"),

    // Plans
    "basicPlan" => ("Plan Básico", "Basic Plan", "Plano Básico"),
    "masterPlan" => ("Plan Master", "Master Plan", "Plano Master"),
    "standardPlan" => ("Plan Estándar", "Standard Plan"),
    "premiumPlan" => ("Plan Premium", "Premium Plan", "Plano Premium"),
    "buyNow" => ("Comprar Ahora", "Buy Now"),

    // Dashboard
    "preLaunch" => ("Pre-Lanzamiento", "Pre-Launch", "Pré-Lançamento"),
    "daysRemaining" => ("días restantes", "days remaining", "dias restantes"),
    "completedCycles" => ("Ciclos Completados", "Completed Cycles", "Ciclos Concluídos"),
    "position" => ("Posición", "Position", "Posição"),
    "dividends" => ("Dividendos", "Dividends", "Dividendos"),
    "claimDividends" => ("Reclamar Dividendos", "Claim Dividends", "Resgatar Dividendos"),
    "adminPanel" => ("Panel de Administrador", "Admin Panel", "Painel de Administrador"),

    // General
    "welcome" => ("Bienvenido", "Welcome"),
    "project" => ("Proyecto", "Project"),
    "stats" => ("Estadísticas", "Stats", "Estatísticas"),
    "users" => ("Usuarios", "Users", "Usuários"),
    "invested" => ("Invertido", "Invested"),
    "burned" => ("Quemado", "Burned", "Queimados"),
    "burnProgress" => ("Progreso de Quema de TRX", "TRX Burn Progress", "Progresso de Queima de TRX"),
    "totalSupply" => ("Suministro Total", "Total Supply", "Fornecimento Total"),
    "burnGoal" => ("Meta de Quema", "Burn Goal", "Meta de Queima"),

    // Action results
    "installWallet" => ("Por favor instala TronLink", "Please install TronLink", "Por favor instale o TronLink"),
    "walletConnected" => ("Wallet conectada", "Wallet connected", "Carteira conectada"),
    "connectionRejected" => ("Conexión rechazada", "Connection rejected", "Conexão rejeitada"),
    "connectionCancelled" => ("Conexión cancelada", "Connection cancelled", "Conexão cancelada"),
    "connectionError" => ("Error al conectar con TronLink", "Error connecting to TronLink", "Erro ao conectar com o TronLink"),
    "walletNotConnected" => ("Wallet no conectada", "Wallet not connected", "Carteira não conectada"),
    "registerFirst" => ("Debes registrarte primero", "You must register first", "Você deve se registrar primeiro"),
    "insufficientBalance" => ("Balance insuficiente", "Insufficient balance", "Saldo insuficiente"),
    "onlyOwner" => ("Solo el propietario puede hacer esto", "Only the owner can do this"),
    "actionInProgress" => ("Ya hay una operación en curso", "An operation is already in progress"),
    "contractNotConfigured" => ("Dirección del contrato no configurada", "Contract address not configured"),
    "registrationSuccess" => ("Registro exitoso", "Registration successful", "Registro concluído"),
    "planActivated" => ("Plan activado", "Plan activated", "Plano ativado"),
    "dividendsClaimed" => ("Dividendos reclamados exitosamente", "Dividends claimed successfully"),
    "noDividends" => ("No tienes dividendos para reclamar", "You have no dividends to claim"),
    "addressUpdated" => ("Dirección actualizada", "Address updated"),
    "trxBurned" => ("TRX quemados", "TRX burned", "TRX queimados"),
};

static TABLE: Lazy<HashMap<&'static str, &'static Entry>> =
    Lazy::new(|| ENTRIES.iter().map(|(key, entry)| (*key, entry)).collect());

/// Looks up `key` in `language`, falling back to the key itself.
pub fn translate(key: &str, language: Language) -> String {
    lookup(key, language).map_or_else(|| key.to_string(), str::to_string)
}

/// Like [`translate`] but without the key fallback.
pub fn lookup(key: &str, language: Language) -> Option<&'static str> {
    let entry = TABLE.get(key)?;
    Some(match language {
        Language::Es => entry.es,
        Language::En => entry.en,
        Language::Pt => entry.pt.unwrap_or(entry.es),
    })
}

pub fn keys() -> impl Iterator<Item = &'static str> {
    ENTRIES.iter().map(|(key, _)| *key)
}

/// Language-bound lookup handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn t(&self, key: &str) -> String {
        translate(key, self.language)
    }
}
