/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Shared specification documents for unit tests.

/// A small FIX.4.4 specification with header, trailer, body and nested groups.
pub(crate) const SAMPLE: &str = r#"<fix type="FIX" major="4" minor="4">
  <header>
    <field name="BeginString" required="Y"/>
    <field name="BodyLength" required="Y"/>
    <field name="MsgType" required="Y"/>
    <field name="SenderCompID" required="N"/>
    <group name="NoHops" required="N">
      <field name="HopCompID" required="Y"/>
    </group>
  </header>
  <trailer>
    <field name="CheckSum" required="Y"/>
  </trailer>
  <messages>
    <message name="Heartbeat" msgtype="0" msgcat="admin">
      <field name="TestReqID" required="N"/>
    </message>
    <message name="NewOrderSingle" msgtype="D" msgcat="app">
      <field name="ClOrdID" required="Y"/>
      <component name="Instrument" required="Y"/>
      <component name="Parties" required="N"/>
      <group name="NoAllocs" required="N">
        <field name="AllocAccount" required="Y"/>
        <field name="AllocShares" required="N"/>
      </group>
      <field name="Side" required="Y"/>
      <field name="ExecInst" required="N"/>
    </message>
  </messages>
  <components>
    <component name="Instrument">
      <field name="Symbol" required="Y"/>
      <field name="SecurityID" required="N"/>
    </component>
    <component name="Parties">
      <group name="NoPartyIDs" required="Y">
        <field name="PartyID" required="Y"/>
        <field name="PartyIDSource" required="N"/>
        <group name="NoPartySubIDs" required="N">
          <field name="PartySubID" required="Y"/>
          <field name="PartySubIDType" required="N"/>
        </group>
      </group>
    </component>
  </components>
  <fields>
    <field number="8" name="BeginString" type="STRING"/>
    <field number="9" name="BodyLength" type="LENGTH"/>
    <field number="10" name="CheckSum" type="STRING"/>
    <field number="11" name="ClOrdID" type="STRING"/>
    <field number="18" name="ExecInst" type="MULTIPLEVALUESTRING">
      <value enum="1" description="NOT_HELD"/>
      <value enum="G" description="ALL_OR_NONE"/>
    </field>
    <field number="35" name="MsgType" type="STRING">
      <value enum="0" description="HEARTBEAT"/>
      <value enum="D" description="ORDER_SINGLE"/>
    </field>
    <field number="48" name="SecurityID" type="STRING"/>
    <field number="49" name="SenderCompID" type="STRING"/>
    <field number="53" name="AllocShares" type="QTY"/>
    <field number="54" name="Side" type="CHAR">
      <value enum="1" description="BUY"/>
      <value enum="2" description="SELL"/>
    </field>
    <field number="55" name="Symbol" type="STRING"/>
    <field number="78" name="NoAllocs" type="NUMINGROUP"/>
    <field number="79" name="AllocAccount" type="STRING"/>
    <field number="112" name="TestReqID" type="STRING"/>
    <field number="447" name="PartyIDSource" type="CHAR">
      <value enum="B" description="BIC"/>
      <value enum="D" description="PROPRIETARY_CUSTOM_CODE"/>
    </field>
    <field number="448" name="PartyID" type="STRING"/>
    <field number="453" name="NoPartyIDs" type="NUMINGROUP"/>
    <field number="523" name="PartySubID" type="STRING"/>
    <field number="627" name="NoHops" type="NUMINGROUP"/>
    <field number="628" name="HopCompID" type="STRING"/>
    <field number="802" name="NoPartySubIDs" type="NUMINGROUP"/>
    <field number="803" name="PartySubIDType" type="INT"/>
  </fields>
</fix>"#;
